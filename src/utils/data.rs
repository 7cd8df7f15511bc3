use crate::models::{Game, Pick, PickRecord, Team};
use crate::utils::standings::TeamStanding;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Save any serializable snapshot to a JSON file
pub fn save_to_cache<T: Serialize + ?Sized>(
    data: &T,
    cache_file: impl AsRef<Path>,
) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
    std::fs::write(cache_file.as_ref(), json)
        .with_context(|| format!("Failed to write {}", cache_file.as_ref().display()))?;
    Ok(())
}

/// Load a JSON snapshot file
pub fn load_from_cache<T: DeserializeOwned>(cache_file: impl AsRef<Path>) -> Result<T> {
    let path = cache_file.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_json::from_str(&json)
        .with_context(|| format!("Failed to deserialize {}", path.display()))?;
    Ok(data)
}

/// Load games in the CollegeFootballData `/games` response shape
pub fn load_games(games_file: impl AsRef<Path>) -> Result<Vec<Game>> {
    load_from_cache(games_file)
}

pub fn load_teams(teams_file: impl AsRef<Path>) -> Result<Vec<Team>> {
    load_from_cache(teams_file)
}

/// Load stored pick rows for one season, rejecting rows that do not form a valid pick
pub fn load_picks(picks_file: impl AsRef<Path>, season: i32) -> Result<Vec<Pick>> {
    let records: Vec<PickRecord> = load_from_cache(picks_file)?;

    records
        .into_iter()
        .filter(|r| r.season == season)
        .map(|r| {
            let id = r.id;
            Pick::try_from(r).with_context(|| format!("Invalid pick {}", id))
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct StandingRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Team")]
    team: &'a str,
    #[serde(rename = "Picks")]
    picks: usize,
    #[serde(rename = "Wins")]
    wins: usize,
    #[serde(rename = "Losses")]
    losses: usize,
    #[serde(rename = "Winnings")]
    winnings: String,
    #[serde(rename = "Winnings By Wager")]
    winnings_by_wager_amount: String,
    #[serde(rename = "Potential")]
    potential: String,
}

/// Save standings to CSV
pub fn save_standings_to_csv(
    standings: &[TeamStanding],
    filename: impl AsRef<Path>,
) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(filename.as_ref()).context("Failed to create CSV file")?;

    for (i, standing) in standings.iter().enumerate() {
        writer.serialize(StandingRow {
            rank: i + 1,
            team: &standing.team_name,
            picks: standing.total_picks,
            wins: standing.wins,
            losses: standing.losses,
            winnings: format!("{:.2}", standing.winnings),
            winnings_by_wager_amount: format!("{:.2}", standing.winnings_by_wager_amount),
            potential: format!("{:.2}", standing.potential),
        })?;
    }

    writer.flush().context("Failed to write CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PickKind;

    #[test]
    fn test_load_picks_filters_season_and_types_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picks.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "teamId": 10, "season": 2025, "week": 1, "gameId": 1000,
                 "pickType": "OVER", "duration": "FULL", "odds": -110, "double": false,
                 "total": 48.5, "spread": null, "cfbTeamId": null},
                {"id": 2, "teamId": 10, "season": 2024, "week": 1, "gameId": 900,
                 "pickType": "MONEYLINE", "duration": "1H", "odds": 120, "double": true,
                 "total": null, "spread": null, "cfbTeamId": 61}
            ]"#,
        )
        .unwrap();

        let picks = load_picks(&path, 2025).unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].kind, PickKind::Over { total: 48.5 });
    }

    #[test]
    fn test_load_picks_reports_bad_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picks.json");
        std::fs::write(
            &path,
            r#"[{"id": 7, "teamId": 10, "season": 2025, "week": 1, "gameId": 1000,
                 "pickType": "SPREAD", "duration": "FULL", "odds": -110, "double": false,
                 "total": null, "spread": null, "cfbTeamId": 61}]"#,
        )
        .unwrap();

        let err = load_picks(&path, 2025).unwrap_err();
        assert!(err.to_string().contains("Invalid pick 7"));
    }

    #[test]
    fn test_save_standings_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standings.csv");
        let standings = vec![TeamStanding {
            team_id: 10,
            team_name: "Sharps".to_string(),
            picks: vec![],
            total_picks: 3,
            wins: 2,
            losses: 1,
            potential: 4.5,
            winnings: 1.25,
            winnings_by_wager_amount: 1.0,
        }];

        save_standings_to_csv(&standings, &path).unwrap();
        let csv = std::fs::read_to_string(&path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Rank,Team,Picks,Wins,Losses,Winnings,Winnings By Wager,Potential")
        );
        assert_eq!(lines.next(), Some("1,Sharps,3,2,1,1.25,1.00,4.50"));
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams.json");
        let teams = vec![Team {
            id: 1,
            name: "Sharps".to_string(),
        }];
        save_to_cache(&teams, &path).unwrap();
        let loaded = load_teams(&path).unwrap();
        assert_eq!(loaded[0].name, "Sharps");
    }
}
