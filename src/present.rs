//! Console presentation of upstream records
//!
//! Renderers write plain text to any [`Write`] sink so the processing cycle can
//! target stdout while tests capture into a buffer. Selection helpers decide
//! which records are displayed.

use std::cmp::Ordering;
use std::io::{self, Write};

use chrono::NaiveDate;

use crate::data::{Film, Person, Planet, Starship, Vehicle};

/// Maximum number of starships listed per cycle
pub const MAX_STARSHIPS_SHOWN: usize = 3;

/// Planets must have strictly more inhabitants than this to be listed
pub const MIN_PLANET_POPULATION: u64 = 1_000_000_000;

/// Planets must be strictly wider than this (km) to be listed
pub const MIN_PLANET_DIAMETER: u64 = 10_000;

fn or_unknown(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("unknown")
}

/// Formats a credit cost, treating a missing or `"unknown"` value as unknown
fn format_cost(cost: &Option<String>) -> String {
    match cost.as_deref() {
        None | Some("unknown") => "Unknown".to_string(),
        Some(credits) => format!("{} credits", credits),
    }
}

/// Parses the leading decimal digits of a numeric-looking string
///
/// `"200000"` gives 200000 and `"1,000"` gives 1. Strings that don't start with
/// a digit, like `"unknown"`, give `None`. A digit run too long for `u64`
/// saturates at `u64::MAX`.
pub fn parse_leading_number(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let digits = &trimmed[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Whether a planet clears both the population and the diameter threshold
///
/// A planet whose population or diameter cannot be read is never selected.
pub fn is_large_and_populous(planet: &Planet, min_population: u64, min_diameter: u64) -> bool {
    let population = planet.population.as_deref().and_then(parse_leading_number);
    let diameter = planet.diameter.as_deref().and_then(parse_leading_number);

    matches!(population, Some(p) if p > min_population)
        && matches!(diameter, Some(d) if d > min_diameter)
}

/// Keeps the planets that are both large and populous, in their original order
pub fn select_large_populous_planets(
    planets: &[Planet],
    min_population: u64,
    min_diameter: u64,
) -> Vec<&Planet> {
    planets
        .iter()
        .filter(|planet| is_large_and_populous(planet, min_population, min_diameter))
        .collect()
}

fn release_date(film: &Film) -> Option<NaiveDate> {
    film.release_date
        .as_deref()
        .and_then(|date| NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok())
}

/// Sorts films into ascending release order
///
/// Films without a readable release date go last, keeping their relative order.
pub fn sort_films_by_release(films: &mut [Film]) {
    films.sort_by(|a, b| match (release_date(a), release_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn render_person<W: Write>(out: &mut W, person: &Person) -> io::Result<()> {
    writeln!(out, "\n--- Character ---")?;
    writeln!(out, "Name: {}", or_unknown(&person.name))?;
    writeln!(out, "Height: {}", or_unknown(&person.height))?;
    writeln!(out, "Mass: {}", or_unknown(&person.mass))?;
    writeln!(out, "Birth Year: {}", or_unknown(&person.birth_year))?;
    if !person.films.is_empty() {
        writeln!(out, "Appears in {} film(s)", person.films.len())?;
    }
    Ok(())
}

/// Renders the starship section: the total count and the first few ships
pub fn render_starships<W: Write>(
    out: &mut W,
    total: Option<u64>,
    starships: &[Starship],
) -> io::Result<()> {
    writeln!(out, "\n--- Starships ---")?;
    match total {
        Some(total) => writeln!(out, "Total starships: {}", total)?,
        None => writeln!(out, "Total starships: unknown")?,
    }
    for (index, starship) in starships.iter().take(MAX_STARSHIPS_SHOWN).enumerate() {
        render_starship(out, starship, index)?;
    }
    Ok(())
}

/// Renders one starship; `index` is zero-based and displayed one-based
pub fn render_starship<W: Write>(out: &mut W, starship: &Starship, index: usize) -> io::Result<()> {
    writeln!(out, "\nStarship {}:", index + 1)?;
    writeln!(out, "  Name: {}", or_unknown(&starship.name))?;
    writeln!(out, "  Model: {}", or_unknown(&starship.model))?;
    writeln!(out, "  Cost: {}", format_cost(&starship.cost_in_credits))
}

/// Renders the planet section containing only the selected planets
pub fn render_planets<W: Write>(out: &mut W, planets: &[&Planet]) -> io::Result<()> {
    writeln!(out, "\n--- Large and Populous Planets ---")?;
    for planet in planets {
        render_planet(out, planet)?;
    }
    Ok(())
}

pub fn render_planet<W: Write>(out: &mut W, planet: &Planet) -> io::Result<()> {
    writeln!(
        out,
        "{} - Pop: {}, Diameter: {}, Climate: {}",
        or_unknown(&planet.name),
        or_unknown(&planet.population),
        or_unknown(&planet.diameter),
        or_unknown(&planet.climate)
    )?;
    if !planet.films.is_empty() {
        writeln!(out, "  Appears in {} film(s)", planet.films.len())?;
    }
    Ok(())
}

/// Renders films in the order given, numbered from 1
pub fn render_films<W: Write>(out: &mut W, films: &[Film]) -> io::Result<()> {
    writeln!(out, "\n--- Star Wars Films (Release Order) ---")?;
    for (index, film) in films.iter().enumerate() {
        writeln!(
            out,
            "\n{}. {} ({})",
            index + 1,
            or_unknown(&film.title),
            or_unknown(&film.release_date)
        )?;
        writeln!(out, "   Director: {}", or_unknown(&film.director))?;
    }
    Ok(())
}

pub fn render_vehicle<W: Write>(out: &mut W, vehicle: &Vehicle) -> io::Result<()> {
    writeln!(out, "\n--- Featured Vehicle ---")?;
    writeln!(out, "Name: {}", or_unknown(&vehicle.name))?;
    writeln!(out, "Model: {}", or_unknown(&vehicle.model))?;
    writeln!(out, "Cost: {}", format_cost(&vehicle.cost_in_credits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Collection, FromRecord};
    use serde_json::json;

    fn rendered<F>(render: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        render(&mut buf).expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("output is UTF-8")
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("200000"), Some(200000));
        assert_eq!(parse_leading_number("2000000000"), Some(2_000_000_000));
        assert_eq!(parse_leading_number("1,000"), Some(1));
        assert_eq!(parse_leading_number("  42km"), Some(42));
        assert_eq!(parse_leading_number("unknown"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_parse_leading_number_saturates_on_overflow() {
        assert_eq!(parse_leading_number("100000000000000000000"), Some(u64::MAX));
        assert_eq!(parse_leading_number("99999999999999999999999 beings"), Some(u64::MAX));
    }

    #[test]
    fn test_planet_filter_selects_planet_with_huge_population() {
        let planet = Planet {
            name: Some("Coruscant".to_string()),
            population: Some("100000000000000000000".to_string()),
            diameter: Some("20000".to_string()),
            ..Planet::default()
        };
        assert!(is_large_and_populous(&planet, MIN_PLANET_POPULATION, MIN_PLANET_DIAMETER));
    }

    #[test]
    fn test_planet_filter_selects_only_alderaan() {
        let page = Collection::from_record(&json!({
            "count": 2,
            "results": [
                { "name": "Tatooine", "population": "200000", "diameter": "10465" },
                { "name": "Alderaan", "population": "2000000000", "diameter": "12500" }
            ]
        }));
        let planets: Vec<Planet> = page.records();

        let selected =
            select_large_populous_planets(&planets, MIN_PLANET_POPULATION, MIN_PLANET_DIAMETER);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name.as_deref(), Some("Alderaan"));
    }

    #[test]
    fn test_planet_filter_treats_unknown_as_not_selected() {
        let planet = Planet {
            name: Some("Coruscant".to_string()),
            population: Some("1000000000000".to_string()),
            diameter: Some("unknown".to_string()),
            ..Planet::default()
        };
        assert!(!is_large_and_populous(&planet, MIN_PLANET_POPULATION, MIN_PLANET_DIAMETER));
    }

    #[test]
    fn test_planet_filter_thresholds_are_strict() {
        let planet = Planet {
            population: Some("1000000000".to_string()),
            diameter: Some("10001".to_string()),
            ..Planet::default()
        };
        assert!(!is_large_and_populous(&planet, MIN_PLANET_POPULATION, MIN_PLANET_DIAMETER));
    }

    #[test]
    fn test_films_sorted_by_release_date() {
        let mut films: Vec<Film> = [
            ("Attack of the Clones", "2002-05-16"),
            ("A New Hope", "1977-05-25"),
            ("Revenge of the Sith", "2005-05-19"),
        ]
        .iter()
        .map(|(title, date)| Film {
            title: Some(title.to_string()),
            release_date: Some(date.to_string()),
            director: Some("George Lucas".to_string()),
        })
        .collect();

        sort_films_by_release(&mut films);

        let years: Vec<&str> = films
            .iter()
            .map(|f| &f.release_date.as_deref().unwrap()[..4])
            .collect();
        assert_eq!(years, vec!["1977", "2002", "2005"]);
    }

    #[test]
    fn test_films_without_dates_sort_last() {
        let film = |title: &str, date: Option<&str>| Film {
            title: Some(title.to_string()),
            release_date: date.map(String::from),
            director: None,
        };
        let mut films = vec![
            film("Undated", None),
            film("Empire", Some("1980-05-17")),
            film("Garbled", Some("soon")),
            film("Hope", Some("1977-05-25")),
        ];

        sort_films_by_release(&mut films);

        let titles: Vec<&str> = films.iter().map(|f| f.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["Hope", "Empire", "Undated", "Garbled"]);
    }

    #[test]
    fn test_render_person() {
        let person = Person {
            name: Some("Luke Skywalker".to_string()),
            height: Some("172".to_string()),
            mass: Some("77".to_string()),
            birth_year: Some("19BBY".to_string()),
            films: vec![json!("f1"), json!("f2"), json!("f3")],
        };

        let text = rendered(|out| render_person(out, &person));

        assert!(text.contains("--- Character ---"));
        assert!(text.contains("Name: Luke Skywalker"));
        assert!(text.contains("Birth Year: 19BBY"));
        assert!(text.contains("Appears in 3 film(s)"));
    }

    #[test]
    fn test_render_person_without_films_omits_count() {
        let text = rendered(|out| render_person(out, &Person::default()));
        assert!(text.contains("Name: unknown"));
        assert!(!text.contains("film(s)"));
    }

    #[test]
    fn test_render_starships_limits_to_three() {
        let ships: Vec<Starship> = (1..=5)
            .map(|n| Starship {
                name: Some(format!("Ship {}", n)),
                model: Some("Model".to_string()),
                cost_in_credits: if n == 2 { Some("unknown".to_string()) } else { Some("1000".to_string()) },
            })
            .collect();

        let text = rendered(|out| render_starships(out, Some(36), &ships));

        assert!(text.contains("Total starships: 36"));
        assert!(text.contains("Starship 3:"));
        assert!(!text.contains("Starship 4:"));
        assert!(text.contains("Cost: 1000 credits"));
        assert!(text.contains("Cost: Unknown"));
    }

    #[test]
    fn test_render_planet_line() {
        let planet = Planet {
            name: Some("Alderaan".to_string()),
            population: Some("2000000000".to_string()),
            diameter: Some("12500".to_string()),
            climate: Some("temperate".to_string()),
            films: vec![json!("f1"), json!("f6")],
        };

        let text = rendered(|out| render_planet(out, &planet));

        assert!(text.contains("Alderaan - Pop: 2000000000, Diameter: 12500, Climate: temperate"));
        assert!(text.contains("  Appears in 2 film(s)"));
    }

    #[test]
    fn test_render_films_numbered() {
        let films = vec![
            Film {
                title: Some("A New Hope".to_string()),
                release_date: Some("1977-05-25".to_string()),
                director: Some("George Lucas".to_string()),
            },
            Film {
                title: Some("The Empire Strikes Back".to_string()),
                release_date: Some("1980-05-17".to_string()),
                director: Some("Irvin Kershner".to_string()),
            },
        ];

        let text = rendered(|out| render_films(out, &films));

        assert!(text.contains("1. A New Hope (1977-05-25)"));
        assert!(text.contains("2. The Empire Strikes Back (1980-05-17)"));
        assert!(text.contains("   Director: Irvin Kershner"));
    }

    #[test]
    fn test_render_vehicle_cost() {
        let vehicle = Vehicle {
            name: Some("Sand Crawler".to_string()),
            model: Some("Digger Crawler".to_string()),
            cost_in_credits: Some("150000".to_string()),
        };

        let text = rendered(|out| render_vehicle(out, &vehicle));

        assert!(text.contains("--- Featured Vehicle ---"));
        assert!(text.contains("Cost: 150000 credits"));
        let unknown = rendered(|out| render_vehicle(out, &Vehicle::default()));
        assert!(unknown.contains("Cost: Unknown"));
    }
}
