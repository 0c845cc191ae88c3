use crate::output::{display_field, new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviepilot_client::MediaServer;
use moviepilot_models::{search_candidates, MediaRef};

pub async fn run_search(server: &dyn MediaServer, title: &str, output: &Output) -> Result<()> {
    tracing::debug!(title, "Search command started");

    let response = server
        .search_media_info(title)
        .await
        .ok_or_else(|| eyre!("Search for '{}' on {} failed, see the log for details", title, server.server_name()))?;

    if !output.is_human() {
        output.json(&response);
        return Ok(());
    }

    let candidates = search_candidates(&response);
    if candidates.is_empty() {
        output.warn(format!("No results for '{}'", title));
        return Ok(());
    }

    let mut table = new_table(&["Title", "Year", "Type", "TMDB ID"]);
    for item in &candidates {
        let tmdb_id = MediaRef::from_search_item(item)
            .map(|media| media.tmdb_id)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            display_field(item, "title"),
            display_field(item, "year"),
            display_field(item, "type"),
            tmdb_id,
        ]);
    }
    output.table(&table);
    output.info(format!("{} result(s)", candidates.len()));
    Ok(())
}

pub async fn run_seasons(server: &dyn MediaServer, tmdb_id: &str, output: &Output) -> Result<()> {
    let response = server
        .list_all_seasons(tmdb_id)
        .await
        .ok_or_else(|| eyre!("Could not list seasons for TMDB id {}, see the log for details", tmdb_id))?;

    let seasons = match response.as_array() {
        Some(seasons) if output.is_human() => seasons,
        _ => {
            output.json(&response);
            return Ok(());
        }
    };

    if seasons.is_empty() {
        output.warn(format!("No seasons listed for TMDB id {}", tmdb_id));
        return Ok(());
    }

    let mut table = new_table(&["Season", "Name", "Episodes", "Air date"]);
    for season in seasons {
        table.add_row(vec![
            display_field(season, "season_number"),
            display_field(season, "name"),
            display_field(season, "episode_count"),
            display_field(season, "air_date"),
        ]);
    }
    output.table(&table);
    Ok(())
}
