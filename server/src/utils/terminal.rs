//! Terminal output helpers

const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Render `url` in cyan, wrapped in an OSC 8 hyperlink when the terminal
/// supports it
pub fn terminal_link(url: &str) -> String {
    render_link(
        url,
        supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout),
    )
}

fn render_link(url: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        format!("\x1b]8;;{url}\x07{CYAN}{url}{RESET}\x1b]8;;\x07")
    } else {
        format!("{CYAN}{url}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        assert_eq!(
            render_link("http://127.0.0.1:5304", false),
            "\x1b[36mhttp://127.0.0.1:5304\x1b[0m"
        );
    }

    #[test]
    fn test_render_hyperlink() {
        let out = render_link("http://127.0.0.1:5304", true);
        assert!(out.starts_with("\x1b]8;;http://127.0.0.1:5304\x07"));
        assert!(out.ends_with("\x1b]8;;\x07"));
    }

    #[test]
    fn test_terminal_link_contains_url() {
        assert!(terminal_link("http://localhost/").contains("http://localhost/"));
    }
}
