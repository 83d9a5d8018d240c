use std::env;
use std::process::Command;

/// Platform command that hands the map URL to the desktop's default browser
fn browser_command(os: &str, url: &str) -> std::io::Result<Command> {
    let (program, args): (&str, &[&str]) = match os {
        "macos" => ("open", &[]),
        "windows" => ("cmd", &["/C", "start", ""]),
        "linux" | "freebsd" | "openbsd" | "netbsd" => ("xdg-open", &[]),
        _ => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                format!("No browser launcher known for {}", os),
            ))
        }
    };

    let mut command = Command::new(program);
    command.args(args).arg(url);
    Ok(command)
}

pub fn open_browser(url: &str) -> std::io::Result<()> {
    browser_command(env::consts::OS, url)?.spawn()?;
    tracing::info!("🌍 Opened {} in the browser", url);
    Ok(())
}

/// Resolves when the process receives Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, run until killed
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutting down");
}
