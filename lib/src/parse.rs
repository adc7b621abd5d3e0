//! # Input file parsing
//!
//! An input file lists lands, target spells, cyclers and settings, either
//! under `LANDS`, `SPELLS`, `CYCLERS` and `SETTINGS` headers (in any order,
//! case-insensitive) or, without any header, as up to four paragraphs
//! separated by blank lines in that same order:
//!
//! ```text
//! LANDS
//! basic W 20
//! shock WU 4
//!
//! SPELLS
//! 1WWW
//! {2/U}W
//!
//! CYCLERS
//! U 2 3
//!
//! SETTINGS
//! cycles 10000
//! play true
//! deck_size 60
//! ```
//!
//! Land lines are `<type> <production> <count>`, cycler lines are
//! `<color> <lands needed> <count>` and setting lines are `<key> <value>`.
use crate::card::{CyclerDefinition, LandDefinition, LandKind, ManaCost, ManaProduction};
use crate::config::{Settings, SettingsBuilder};
use crate::deck::{Deck, DeckBuilder};
use crate::error::{Error, Result};
use regex::Regex;

lazy_static! {
    static ref LAND_LINE: Regex =
        Regex::new(r"^(?P<kind>\S+)\s+(?P<production>\S+)\s+(?P<count>\d+)(?:\s.*)?$")
            .expect("Failed to compile LAND_LINE");
    static ref CYCLER_LINE: Regex =
        Regex::new(r"^(?P<production>\S+)\s+(?P<threshold>\S+)\s+(?P<count>\S+)(?:\s.*)?$")
            .expect("Failed to compile CYCLER_LINE");
    static ref SETTING_LINE: Regex = Regex::new(r"^(?P<key>\S+)\s+(?P<value>\S+)(?:\s.*)?$")
        .expect("Failed to compile SETTING_LINE");
}

/// Input is the validated content of an input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    pub deck: Deck,
    pub spells: Vec<ManaCost>,
    pub settings: Settings,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Section {
    Lands,
    Spells,
    Cyclers,
    Settings,
}

impl Section {
    const PARAGRAPH_ORDER: [Section; 4] = [
        Section::Lands,
        Section::Spells,
        Section::Cyclers,
        Section::Settings,
    ];

    fn from_header(line: &str) -> Option<Self> {
        match line.to_uppercase().as_str() {
            "LANDS" => Some(Section::Lands),
            "SPELLS" => Some(Section::Spells),
            "CYCLERS" => Some(Section::Cyclers),
            "SETTINGS" => Some(Section::Settings),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Collector {
    lands: Vec<(LandDefinition, usize)>,
    cyclers: Vec<(CyclerDefinition, usize)>,
    spells: Vec<ManaCost>,
    settings: SettingsBuilder,
}

impl Collector {
    fn add(&mut self, section: Section, line: &str) -> Result<()> {
        match section {
            Section::Lands => self.lands.push(parse_land_line(line)?),
            Section::Spells => self.spells.push(line.parse()?),
            Section::Cyclers => self.cyclers.push(parse_cycler_line(line)?),
            Section::Settings => {
                let caps = SETTING_LINE
                    .captures(line)
                    .ok_or_else(|| malformed("<key> <value>", line))?;
                self.settings.set(&caps["key"], &caps["value"])?;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<Input> {
        if self.lands.is_empty() {
            return Err(Error::NoLands);
        }
        if self.spells.is_empty() {
            return Err(Error::NoSpells);
        }
        let settings = self.settings.build()?;
        let mut builder = DeckBuilder::new(settings.deck_size);
        for (land, count) in self.lands {
            builder = builder.land(land, count);
        }
        for (cycler, count) in self.cyclers {
            builder = builder.cycler(cycler, count);
        }
        Ok(Input {
            deck: builder.build()?,
            spells: self.spells,
            settings,
        })
    }
}

/// Parses the content of an input file
pub fn parse_input(text: &str) -> Result<Input> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .collect();
    let has_headers = lines
        .iter()
        .any(|(_, line)| Section::from_header(line).is_some());
    let mut collector = Collector::default();
    if has_headers {
        let mut section = None;
        for (number, line) in lines {
            if line.is_empty() {
                continue;
            }
            if let Some(header) = Section::from_header(line) {
                section = Some(header);
                continue;
            }
            let current = section
                .ok_or_else(|| malformed("a section header", line).at_line(number))?;
            collector
                .add(current, line)
                .map_err(|e| e.at_line(number))?;
        }
    } else {
        let mut paragraph = 0;
        let mut in_paragraph = false;
        for (number, line) in lines {
            if line.is_empty() {
                if in_paragraph {
                    paragraph += 1;
                    in_paragraph = false;
                }
                continue;
            }
            in_paragraph = true;
            let current = *Section::PARAGRAPH_ORDER
                .get(paragraph)
                .ok_or_else(|| malformed("at most four paragraphs", line).at_line(number))?;
            collector
                .add(current, line)
                .map_err(|e| e.at_line(number))?;
        }
    }
    collector.finish()
}

fn parse_land_line(line: &str) -> Result<(LandDefinition, usize)> {
    let caps = LAND_LINE
        .captures(line)
        .ok_or_else(|| malformed("<type> <production> <count>", line))?;
    let kind: LandKind = caps["kind"].parse()?;
    let production: ManaProduction = caps["production"].parse()?;
    let count = caps["count"]
        .parse::<usize>()
        .map_err(|_| malformed("<type> <production> <count>", line))?;
    Ok((LandDefinition::new(kind, production)?, count))
}

fn parse_cycler_line(line: &str) -> Result<(CyclerDefinition, usize)> {
    let caps = CYCLER_LINE
        .captures(line)
        .ok_or_else(|| malformed("<color> <lands needed> <count>", line))?;
    let production: ManaProduction = caps["production"].parse()?;
    let threshold = positive(&caps["threshold"], "cycling cost")?;
    let count = positive(&caps["count"], "count")?;
    Ok((CyclerDefinition::from_production(&production, threshold)?, count))
}

fn positive(value: &str, name: &'static str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::NotPositive(name)),
    }
}

fn malformed(expected: &'static str, line: &str) -> Error {
    Error::MalformedLine {
        expected,
        text: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::card::*;
    use crate::error::Error;
    use crate::parse::*;

    #[test]
    fn header_format() {
        let input = parse_input(
            "LANDS\nbasic W 20\nshock WU 4\n\nSPELLS\n1WWW\n2UW\n\nSETTINGS\ncycles 10000\nplay true\ndeck_size 60\n",
        )
        .unwrap();
        assert_eq!(input.deck.land_count(), 24);
        assert_eq!(input.deck.lands.len(), 2);
        assert_eq!(input.deck.lands[1].land.kind, LandKind::Shock);
        assert_eq!(input.spells.len(), 2);
        assert_eq!(input.spells[0].text(), "1WWW");
        assert_eq!(input.settings.cycles, 10000);
        assert!(input.settings.on_the_play);
    }

    #[test]
    fn headers_are_case_insensitive_and_unordered() {
        let input = parse_input(
            "spells\n2G\nSettings\ndraw true\nLands\nbasic G 17\ncyclers\nG 2 3\n",
        )
        .unwrap();
        assert_eq!(input.deck.land_count(), 17);
        assert_eq!(input.deck.cycler_count(), 3);
        assert_eq!(input.deck.cyclers[0].cycler.threshold, 2);
        assert!(!input.settings.on_the_play);
    }

    #[test]
    fn paragraph_format() {
        let input = parse_input(
            "basic R 16\nfastland RG 4\n\n1R\nRG\n\nG 1 2\n\ncycles 300\ndecksize 40\n",
        )
        .unwrap();
        assert_eq!(input.deck.land_count(), 20);
        assert_eq!(input.deck.deck_size, 40);
        assert_eq!(input.spells.len(), 2);
        assert_eq!(input.deck.cycler_count(), 2);
        assert_eq!(input.settings.cycles, 300);
    }

    #[test]
    fn paragraph_format_lands_and_spells_only() {
        let input = parse_input("\n\nbasic U 24\n\n\n\nUU\n").unwrap();
        assert_eq!(input.deck.land_count(), 24);
        assert_eq!(input.spells[0].text(), "UU");
        assert_eq!(input.settings.deck_size, 60);
    }

    #[test]
    fn unknown_land_type_reports_line() {
        let err = parse_input("LANDS\nbasic W 20\ninvalid_type W 4\nSPELLS\nW\n").unwrap_err();
        match err {
            Error::AtLine { line, source } => {
                assert_eq!(line, 3);
                match *source {
                    Error::UnknownLandType(name) => assert_eq!(name, "invalid_type"),
                    other => panic!("unexpected error {:?}", other),
                }
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn missing_sections() {
        match parse_input("SPELLS\n1W\n") {
            Err(Error::NoLands) => {}
            other => panic!("unexpected result {:?}", other),
        }
        match parse_input("LANDS\nbasic W 20\n") {
            Err(Error::NoSpells) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn too_many_cards() {
        let res = parse_input("LANDS\nbasic W 50\nSPELLS\nW\nCYCLERS\nW 2 20\n");
        match res {
            Err(Error::TooManyCards { cards, deck_size }) => {
                assert_eq!(cards, 70);
                assert_eq!(deck_size, 60);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn invalid_land_production() {
        assert!(parse_input("LANDS\nbasic WU 20\nSPELLS\nW\n").is_err());
        assert!(parse_input("LANDS\nverge W 4\nSPELLS\nW\n").is_err());
        assert!(parse_input("LANDS\nwilds WU 4\nSPELLS\nW\n").is_err());
        assert!(parse_input("LANDS\nstartingtown WUBRG 4\nSPELLS\nW\n").is_err());
        assert!(parse_input("LANDS\nstartingtown WUBRGC 4\nSPELLS\nW\n").is_ok());
    }

    #[test]
    fn malformed_lines() {
        assert!(parse_input("LANDS\nbasic W\nSPELLS\nW\n").is_err());
        assert!(parse_input("LANDS\nbasic W 20\nSPELLS\n2X\n").is_err());
        assert!(parse_input("LANDS\nbasic W 20\nSPELLS\nW\nCYCLERS\nW 0 2\n").is_err());
        assert!(parse_input("LANDS\nbasic W 20\nSPELLS\nW\nCYCLERS\nWU 2 2\n").is_err());
        assert!(parse_input("basic W 20\nSPELLS\nW\n").is_err());
        assert!(parse_input("basic W 20\n\nW\n\nW 1 1\n\ncycles 5\n\nextra\n").is_err());
    }

    #[test]
    fn contradictory_play_draw() {
        match parse_input("LANDS\nbasic W 20\nSPELLS\nW\nSETTINGS\nplay false\ndraw false\n") {
            Err(Error::AtLine { .. }) => panic!("play/draw is not a line error"),
            Err(Error::ContradictoryPlayDraw) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
