//! Startup banner and URL display

use super::config::is_all_interfaces;
use super::constants::APP_NAME;
use crate::utils::terminal::terminal_link;

/// Startup details shown in the banner
pub struct BannerInfo<'a> {
    pub host: &'a str,
    pub port: u16,
    pub database: &'a str,
    pub data_dir: &'a str,
    pub serves_frontend: bool,
}

/// Print the startup banner with URLs
pub fn print_banner(info: &BannerInfo<'_>) {
    // Use localhost for display when binding to all interfaces
    let display_host = if is_all_interfaces(info.host) {
        "localhost"
    } else {
        info.host
    };
    let base_url = format!("http://{}:{}", display_host, info.port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    const W: usize = 10;

    if info.serves_frontend {
        println!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
            "App:",
            terminal_link(&base_url)
        );
    }
    println!(
        "  \x1b[33m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "API docs:",
        terminal_link(&format!("{}/api/docs", base_url))
    );

    if info.host == "127.0.0.1" || info.host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    } else if is_all_interfaces(info.host) {
        if let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                println!(
                    "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
                    "Network:",
                    terminal_link(&format!("http://{}:{}", ip, info.port))
                );
            }
        }
    } else {
        println!(
            "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
            "Network:",
            terminal_link(&base_url)
        );
    }
    println!(
        "  \x1b[90m➜  {:<W$} {} ({})\x1b[0m",
        "Database:", info.database, info.data_dir
    );

    println!();
}
