//! Small hand-built dataset shared by unit tests.
//!
//! Three tournaments (1970, 1982, 1998), one orphaned 1994 match and one
//! player row pointing at a match that does not exist.

use std::sync::Arc;

use chrono::NaiveDate;

use super::ReferenceStore;
use crate::lookup::ReferenceLookups;
use crate::models::{MatchRecord, PlayerEventRecord, TournamentRecord};
use crate::storage::Dataset;

fn kickoff(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn fixture(
    id: u64,
    year: u16,
    stage: &str,
    home: (&str, &str, u32),
    away: (&str, &str, u32),
    when: chrono::NaiveDateTime,
) -> MatchRecord {
    MatchRecord::new(id, year, stage, home.0, away.0, home.2, away.2)
        .with_initials(home.1, away.1)
        .with_datetime(when)
        .with_venue("Estadio", "City")
}

pub(crate) fn sample_dataset() -> Dataset {
    let tournaments = vec![
        TournamentRecord::new(1970, "Mexico").with_podium("Brazil", "Italy", "Germany FR", "Uruguay"),
        TournamentRecord::new(1982, "Spain").with_podium("Italy", "Germany FR", "Poland", "France"),
        TournamentRecord::new(1998, "France").with_podium("France", "Brazil", "Croatia", "Netherlands"),
    ];

    let mut quarter_final = fixture(
        32,
        1998,
        "Quarter-finals",
        ("Italy", "ITA", 0),
        ("France", "FRA", 0),
        kickoff(1998, 7, 3, 16),
    );
    quarter_final.win_conditions = Some("France win on penalties (3 - 4)".to_string());

    let matches = vec![
        fixture(10, 1970, "Semi-finals", ("Italy", "ITA", 4), ("Germany FR", "FRG", 3), kickoff(1970, 6, 17, 16)),
        fixture(11, 1970, "Final", ("Brazil", "BRA", 4), ("Italy", "ITA", 1), kickoff(1970, 6, 21, 12)),
        fixture(12, 1970, "Group 3", ("Brazil", "BRA", 1), ("Germany FR", "FRG", 0), kickoff(1970, 6, 10, 16)),
        fixture(13, 1970, "Group 1", ("England", "ENG", 0), ("Scotland", "SCO", 0), kickoff(1970, 6, 2, 16)),
        fixture(20, 1982, "Group C", ("Italy", "ITA", 3), ("Brazil", "BRA", 2), kickoff(1982, 7, 5, 17)),
        fixture(21, 1982, "Final", ("Italy", "ITA", 3), ("Germany FR", "FRG", 1), kickoff(1982, 7, 11, 20)),
        fixture(22, 1982, "Group 6", ("Brazil", "BRA", 4), ("Scotland", "SCO", 1), kickoff(1982, 6, 18, 21)),
        fixture(30, 1998, "Group A", ("Brazil", "BRA", 2), ("Scotland", "SCO", 1), kickoff(1998, 6, 10, 17)),
        fixture(31, 1998, "Group A", ("Scotland", "SCO", 1), ("Italy", "ITA", 1), kickoff(1998, 6, 16, 21)),
        fixture(33, 1998, "Final", ("Brazil", "BRA", 0), ("France", "FRA", 3), kickoff(1998, 7, 12, 21)),
        quarter_final,
        fixture(9000, 1994, "Final", ("Brazil", "BRA", 0), ("Italy", "ITA", 0), kickoff(1994, 7, 17, 12)),
    ];

    let player_events = vec![
        PlayerEventRecord::new(10, "ITA", "BONINSEGNA", "G8'"),
        PlayerEventRecord::new(10, "ITA", "BURGNICH", "G98'"),
        PlayerEventRecord::new(10, "ITA", "RIVA", "G104'"),
        PlayerEventRecord::new(10, "ITA", "RIVERA", "G111'"),
        PlayerEventRecord::new(10, "FRG", "MUELLER", "G94' G110'"),
        PlayerEventRecord::new(10, "FRG", "SCHNELLINGER", "G90'"),
        PlayerEventRecord::new(11, "BRA", "PELE", "G18'"),
        PlayerEventRecord::new(11, "BRA", "GERSON", "G66'"),
        PlayerEventRecord::new(11, "BRA", "JAIRZINHO", "G71'"),
        PlayerEventRecord::new(11, "BRA", "CARLOS ALBERTO", "G86'"),
        PlayerEventRecord::new(11, "ITA", "BONINSEGNA", "G37'"),
        PlayerEventRecord::new(12, "BRA", "PELE", "G50'"),
        PlayerEventRecord::new(20, "ITA", "ROSSI", "G5' G25' G74'"),
        PlayerEventRecord::new(20, "BRA", "SOCRATES", "G12'"),
        PlayerEventRecord::new(20, "BRA", "FALCAO", "G68'"),
        PlayerEventRecord::new(21, "ITA", "ROSSI", "G12' P57'"),
        PlayerEventRecord::new(21, "ITA", "TARDELLI", "G69'"),
        PlayerEventRecord::new(21, "FRG", "BREITNER", "G83'"),
        PlayerEventRecord::new(22, "BRA", "ZICO", "G33'"),
        PlayerEventRecord::new(22, "BRA", "OSCAR", "G48'"),
        PlayerEventRecord::new(22, "BRA", "EDER", "G63'"),
        PlayerEventRecord::new(22, "BRA", "FALCAO", "G87'"),
        PlayerEventRecord::new(22, "SCO", "NAREY", "G18'"),
        PlayerEventRecord::new(30, "BRA", "CESAR SAMPAIO", "G5'"),
        PlayerEventRecord::new(30, "BRA", "RONALDO", ""),
        PlayerEventRecord::new(30, "SCO", "COLLINS", "P38'"),
        PlayerEventRecord::new(30, "SCO", "BOYD", "OG74'"),
        PlayerEventRecord::new(31, "SCO", "GALLACHER", "G80'"),
        PlayerEventRecord::new(31, "SCO", "HENDRY", "Y20'"),
        PlayerEventRecord::new(31, "ITA", "VIERI", "G10'"),
        PlayerEventRecord::new(32, "ITA", "MALDINI", "Y30'"),
        PlayerEventRecord::new(32, "FRA", "DESCHAMPS", "Y40'"),
        PlayerEventRecord::new(33, "FRA", "ZIDANE", "G27' G45'"),
        PlayerEventRecord::new(33, "FRA", "PETIT", "G90'"),
        PlayerEventRecord::new(33, "FRA", "DESAILLY", "Y48' RSY68'"),
        PlayerEventRecord::new(33, "BRA", "EDMUNDO", "Y70'"),
        PlayerEventRecord::new(33, "BRA", "RONALDO", ""),
        PlayerEventRecord::new(8888, "ARG", "KEMPES", "G10' G20' G30' G40' G50' G60'"),
    ];

    Dataset {
        tournaments,
        matches,
        player_events,
    }
}

pub(crate) fn sample_store() -> ReferenceStore {
    ReferenceStore::build(sample_dataset(), ReferenceLookups::default())
}

pub(crate) fn shared_store() -> Arc<ReferenceStore> {
    Arc::new(sample_store())
}
