use crate::output::{new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Color};
use moviepilot_client::MediaServer;
use moviepilot_models::DownloadTask;

fn progress_cell(task: &DownloadTask) -> Cell {
    let percent = task.progress_percent();
    let cell = Cell::new(format!("{:.1}%", percent));
    if percent >= 100.0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Yellow)
    }
}

pub async fn run_progress(server: &dyn MediaServer, output: &Output) -> Result<()> {
    let tasks = server
        .get_download_progress()
        .await
        .ok_or_else(|| eyre!("Could not fetch download progress from {}, see the log for details", server.server_name()))?;

    if !output.is_human() {
        output.json(&serde_json::to_value(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        output.info("No downloads in progress");
        return Ok(());
    }

    let mut table = new_table(&["Title", "Type", "Progress", "State"]);
    for task in &tasks {
        table.add_row(vec![
            Cell::new(task.display_title()),
            Cell::new(task.media.media_type.as_deref().unwrap_or("-")),
            progress_cell(task),
            Cell::new(&task.state),
        ]);
    }
    output.table(&table);
    Ok(())
}
