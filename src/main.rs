use anyhow::Context;
use mafia_moderator::script::Script;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MAFIA_SCRIPT").ok())
        .context("no script given; pass a path or set MAFIA_SCRIPT")?;

    let script = Script::load(&path)?;
    let replay = script.run()?;
    if !replay.rejected.is_empty() {
        log::warn!("{} command(s) were rejected", replay.rejected.len());
    }

    for line in replay.game.logbook() {
        println!("{}", line);
    }
    println!("{}", serde_json::to_string_pretty(&replay.game.get_board_json())?);
    Ok(())
}
