use std::path::Path;

use hoopclip_worker::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = WorkerConfig::from_env();

    println!(
        "hoopclip-selfcheck: starting with work_dir={}",
        config.work_dir.display()
    );
    config.validate()?;
    ensure_workdir(&config.work_dir).await?;
    ensure_detections(&config.detections_path)?;
    if config.wants_highlights() {
        hoopclip_media::check_ffmpeg().map_err(|e| anyhow::anyhow!("{}", e))?;
        hoopclip_media::check_ffprobe().map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    println!("hoopclip-selfcheck: ok");
    Ok(())
}

async fn ensure_workdir<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(path.as_ref()).await?;
    Ok(())
}

fn ensure_detections(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        return Err(anyhow::anyhow!(
            "detections file not found: {}",
            path.display()
        ));
    }
    Ok(())
}
