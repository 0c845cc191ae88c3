use crate::output::Output;
use crate::SubscribeCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use moviepilot_client::MediaServer;
use moviepilot_models::MediaRef;

pub async fn run_subscribe(server: &dyn MediaServer, cmd: SubscribeCommands, output: &Output) -> Result<()> {
    let (media, season) = match cmd {
        SubscribeCommands::Movie { title, tmdb_id } => (MediaRef::new(title, tmdb_id), None),
        SubscribeCommands::Series { title, tmdb_id, season } => (MediaRef::new(title, tmdb_id), Some(season)),
    };

    let subscribed = match season {
        Some(season) => server.subscribe_series(&media, season).await,
        None => server.subscribe_movie(&media).await,
    };

    let what = match season {
        Some(season) => format!("{} season {}", media.title, season),
        None => media.title.clone(),
    };

    if !subscribed {
        return Err(eyre!("Subscription to {} was not accepted, see the log for details", what));
    }

    output.success(format!("Subscribed to {} (TMDB {})", what, media.tmdb_id));
    Ok(())
}
