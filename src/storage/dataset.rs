//! CSV loading for the three source tables.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::cleanup::{clean_opt, clean_text};
use super::{StorageConfig, StorageError};
use crate::models::{MatchRecord, Officials, PlayerEventRecord, TournamentRecord};

/// The three loaded tables, cleaned and de-duplicated.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub tournaments: Vec<TournamentRecord>,
    pub matches: Vec<MatchRecord>,
    pub player_events: Vec<PlayerEventRecord>,
}

#[derive(Debug, Deserialize)]
struct RawTournament {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Winner")]
    winner: Option<String>,
    #[serde(rename = "Runners-Up")]
    runners_up: Option<String>,
    #[serde(rename = "Third")]
    third: Option<String>,
    #[serde(rename = "Fourth")]
    fourth: Option<String>,
    #[serde(rename = "GoalsScored")]
    goals_scored: Option<String>,
    #[serde(rename = "QualifiedTeams")]
    qualified_teams: Option<String>,
    #[serde(rename = "MatchesPlayed")]
    matches_played: Option<String>,
    #[serde(rename = "Attendance")]
    attendance: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Datetime")]
    datetime: Option<String>,
    #[serde(rename = "Stage")]
    stage: Option<String>,
    #[serde(rename = "Stadium")]
    stadium: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Home Team Name")]
    home_team: Option<String>,
    #[serde(rename = "Home Team Goals")]
    home_goals: Option<String>,
    #[serde(rename = "Away Team Goals")]
    away_goals: Option<String>,
    #[serde(rename = "Away Team Name")]
    away_team: Option<String>,
    #[serde(rename = "Win conditions")]
    win_conditions: Option<String>,
    #[serde(rename = "Attendance")]
    attendance: Option<String>,
    #[serde(rename = "Referee")]
    referee: Option<String>,
    #[serde(rename = "Assistant 1")]
    assistant_1: Option<String>,
    #[serde(rename = "Assistant 2")]
    assistant_2: Option<String>,
    #[serde(rename = "MatchID")]
    match_id: Option<String>,
    #[serde(rename = "Home Team Initials")]
    home_initials: Option<String>,
    #[serde(rename = "Away Team Initials")]
    away_initials: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlayerEvent {
    #[serde(rename = "MatchID")]
    match_id: Option<String>,
    #[serde(rename = "Team Initials")]
    team_initials: Option<String>,
    #[serde(rename = "Player Name")]
    player_name: Option<String>,
    #[serde(rename = "Event")]
    event: Option<String>,
}

/// Parse an integer that may have been exported as a float (`1930.0`).
fn parse_int(raw: Option<&str>) -> Option<u64> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64))
}

/// Parse an attendance figure with `.` or `,` thousands separators.
fn parse_attendance(raw: Option<&str>) -> Option<u64> {
    let digits: String = raw?.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Parse kick-off strings such as `13 Jul 1930 - 15:00`.
fn parse_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    let s = raw?.trim();
    NaiveDateTime::parse_from_str(s, "%d %b %Y - %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// Read a CSV file as lossy UTF-8 and deserialize every row.
fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    if !path.exists() {
        return Err(StorageError::MissingFile(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => {
                return Err(StorageError::Csv {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
            Err(e) => warn!("Skipping row {} in {:?}: {}", line + 2, path, e),
        }
    }

    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

fn convert_tournament(raw: RawTournament) -> Option<TournamentRecord> {
    let year = parse_int(raw.year.as_deref())? as u16;
    let mut record = TournamentRecord::new(year, clean_opt(raw.country.as_deref())?);
    record.winner = clean_opt(raw.winner.as_deref());
    record.runner_up = clean_opt(raw.runners_up.as_deref());
    record.third = clean_opt(raw.third.as_deref());
    record.fourth = clean_opt(raw.fourth.as_deref());
    record.goals_scored = parse_int(raw.goals_scored.as_deref()).map(|v| v as u32);
    record.qualified_teams = parse_int(raw.qualified_teams.as_deref()).map(|v| v as u32);
    record.matches_played = parse_int(raw.matches_played.as_deref()).map(|v| v as u32);
    record.attendance = parse_attendance(raw.attendance.as_deref());
    Some(record)
}

fn convert_match(raw: RawMatch) -> Option<MatchRecord> {
    let id = parse_int(raw.match_id.as_deref())?;
    let year = parse_int(raw.year.as_deref())? as u16;
    let home = clean_opt(raw.home_team.as_deref())?;
    let away = clean_opt(raw.away_team.as_deref())?;
    let home_goals = parse_int(raw.home_goals.as_deref()).unwrap_or(0) as u32;
    let away_goals = parse_int(raw.away_goals.as_deref()).unwrap_or(0) as u32;
    let stage = clean_opt(raw.stage.as_deref()).unwrap_or_default();

    let mut record = MatchRecord::new(id, year, stage, home, away, home_goals, away_goals);
    if let Some(initials) = clean_opt(raw.home_initials.as_deref()) {
        record.home_initials = initials;
    }
    if let Some(initials) = clean_opt(raw.away_initials.as_deref()) {
        record.away_initials = initials;
    }
    record.stadium = clean_opt(raw.stadium.as_deref());
    record.city = clean_opt(raw.city.as_deref());
    record.datetime = parse_datetime(raw.datetime.as_deref());
    record.win_conditions = clean_opt(raw.win_conditions.as_deref());
    record.attendance = parse_attendance(raw.attendance.as_deref());
    record.officials = Officials {
        referee: clean_opt(raw.referee.as_deref()),
        assistant_1: clean_opt(raw.assistant_1.as_deref()),
        assistant_2: clean_opt(raw.assistant_2.as_deref()),
    };
    Some(record)
}

fn convert_player_event(raw: RawPlayerEvent) -> Option<PlayerEventRecord> {
    let match_id = parse_int(raw.match_id.as_deref())?;
    let player = clean_opt(raw.player_name.as_deref())?;
    let initials = clean_text(raw.team_initials.as_deref().unwrap_or_default());
    let events = raw.event.as_deref().unwrap_or_default();
    Some(PlayerEventRecord::new(match_id, &initials, &player, events))
}

/// Load all three tables from `config.data_dir`.
pub fn load_dataset(config: &StorageConfig) -> Result<Dataset, StorageError> {
    let tournaments: Vec<TournamentRecord> = read_rows::<RawTournament>(&config.tournaments_path())?
        .into_iter()
        .filter_map(convert_tournament)
        .collect();
    info!("Loaded {} tournaments", tournaments.len());

    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let matches: Vec<MatchRecord> = read_rows::<RawMatch>(&config.matches_path())?
        .into_iter()
        .filter_map(convert_match)
        .filter(|m| {
            let fresh = seen.insert(m.id);
            if !fresh {
                duplicates += 1;
            }
            fresh
        })
        .collect();
    info!(
        "Loaded {} matches ({} duplicate ids dropped)",
        matches.len(),
        duplicates
    );

    let player_events: Vec<PlayerEventRecord> =
        read_rows::<RawPlayerEvent>(&config.players_path())?
            .into_iter()
            .filter_map(convert_player_event)
            .collect();
    info!("Loaded {} player rows", player_events.len());

    Ok(Dataset {
        tournaments,
        matches,
        player_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOURNAMENTS: &str = "\u{FEFF}Year,Country,Winner,Runners-Up,Third,Fourth,GoalsScored,QualifiedTeams,MatchesPlayed,Attendance
1930,Uruguay,Uruguay,Argentina,USA,Yugoslavia,70,13,18,590.549
1998,France,France,Brazil,Croatia,Netherlands,171,32,64,2.785.100
";

    const MATCHES: &str = "Year,Datetime,Stage,Stadium,City,Home Team Name,Home Team Goals,Away Team Goals,Away Team Name,Win conditions,Attendance,Half-time Home Goals,Half-time Away Goals,Referee,Assistant 1,Assistant 2,RoundID,MatchID,Home Team Initials,Away Team Initials
1930,13 Jul 1930 - 15:00 ,Group 1,Pocitos,Montevideo ,France,4,1,Mexico, ,4444,3,0,LOMBARDI Domingo (URU),CRISTOPHE Henry (BEL),REGO Gilberto (BRA),201,1096,FRA,MEX
1930,13 Jul 1930 - 15:00 ,Group 1,Pocitos,Montevideo ,France,4,1,Mexico, ,4444,3,0,LOMBARDI Domingo (URU),CRISTOPHE Henry (BEL),REGO Gilberto (BRA),201,1096,FRA,MEX
1998,12 Jul 1998 - 21:00 ,Final,Stade de France,Saint-Denis ,Brazil,0,3,France, ,80000,0,2,BELQOLA Said (MAR),,,43950100,8780,BRA,FRA
,,,,,,,,,,,,,,,,,,,
";

    const PLAYERS: &str = "RoundID,MatchID,Team Initials,Coach Name,Line-up,Shirt Number,Player Name,Position,Event
201,1096,FRA,CAUDRON Raoul (FRA),S,0,Lucien LAURENT,,G19'
201,1096,MEX,LUQUE Juan (MEX),S,0,Juan CARRENO,,G70'
43950100,8780,FRA,JACQUET Aime (FRA),S,10,ZIDANE,,G27' G45'
";

    fn write_fixture(dir: &Path) -> StorageConfig {
        std::fs::write(dir.join("WorldCups.csv"), TOURNAMENTS).unwrap();
        std::fs::write(dir.join("WorldCupMatches.csv"), MATCHES).unwrap();
        std::fs::write(dir.join("WorldCupPlayers.csv"), PLAYERS).unwrap();
        StorageConfig::new(dir.to_path_buf())
    }

    #[test]
    fn test_load_dataset() {
        let tmp = tempfile::tempdir().unwrap();
        let config = write_fixture(tmp.path());

        let data = load_dataset(&config).unwrap();

        assert_eq!(data.tournaments.len(), 2);
        assert_eq!(data.tournaments[0].attendance, Some(590_549));
        assert_eq!(data.tournaments[1].winner.as_deref(), Some("France"));

        // Duplicate match id and blank trailing row dropped
        assert_eq!(data.matches.len(), 2);
        let final_match = &data.matches[1];
        assert_eq!(final_match.id, 8780);
        assert_eq!(final_match.city.as_deref(), Some("Saint-Denis"));
        assert_eq!(final_match.win_conditions, None);
        assert_eq!(final_match.officials.assistant_1, None);
        assert!(final_match.datetime.is_some());

        assert_eq!(data.player_events.len(), 3);
        assert_eq!(data.player_events[2].goals(), 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(tmp.path().to_path_buf());

        let err = load_dataset(&config).unwrap_err();
        assert!(matches!(err, StorageError::MissingFile(_)));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_int(Some("1930.0")), Some(1930));
        assert_eq!(parse_int(Some(" ")), None);
        assert_eq!(parse_attendance(Some("1.045.246")), Some(1_045_246));
        assert!(parse_datetime(Some("13 Jul 1930 - 15:00 ")).is_some());
        assert_eq!(parse_datetime(Some("garbage")), None);
    }
}
