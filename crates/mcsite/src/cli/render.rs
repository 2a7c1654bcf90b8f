use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use mcsite_status::{ServerStatusSnapshot, StatusView};

const EMPTY: &str = "-";

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Host", "Status", "Players", "Version", "Latency", "MOTD"]);
    table
}

pub fn players(snapshot: &ServerStatusSnapshot) -> String {
    snapshot
        .players
        .map(|p| format!("{}/{}", p.online, p.max))
        .unwrap_or_else(|| EMPTY.to_string())
}

pub fn latency(snapshot: &ServerStatusSnapshot) -> String {
    snapshot
        .latency
        .map(|ms| format!("{:.0} ms", ms))
        .unwrap_or_else(|| EMPTY.to_string())
}

pub fn motd(snapshot: &ServerStatusSnapshot) -> String {
    snapshot
        .motd
        .as_ref()
        .map(|lines| {
            lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" / ")
        })
        .filter(|motd| !motd.is_empty())
        .unwrap_or_else(|| EMPTY.to_string())
}

fn snapshot_row(snapshot: &ServerStatusSnapshot) -> Vec<Cell> {
    let status = if snapshot.online {
        Cell::new("online").fg(Color::Green)
    } else {
        Cell::new("offline").fg(Color::Red)
    };

    let host = match snapshot.port {
        Some(port) if !snapshot.host.ends_with(&format!(":{}", port)) => {
            format!("{}:{}", snapshot.host, port)
        }
        _ => snapshot.host.clone(),
    };

    vec![
        Cell::new(host),
        status,
        Cell::new(players(snapshot)),
        Cell::new(snapshot.version.as_deref().unwrap_or(EMPTY)),
        Cell::new(latency(snapshot)),
        Cell::new(motd(snapshot)),
    ]
}

pub fn snapshot_table(snapshots: &[ServerStatusSnapshot]) -> Table {
    let mut table = base_table();
    for snapshot in snapshots {
        table.add_row(snapshot_row(snapshot));
    }
    table
}

/// Table for watch mode, where hosts without a fresh result show as loading.
pub fn view_table<'a>(views: impl IntoIterator<Item = (&'a str, &'a StatusView)>) -> Table {
    let mut table = base_table();
    for (host, view) in views {
        match view {
            StatusView::Ready(snapshot) => {
                table.add_row(snapshot_row(snapshot));
            }
            StatusView::Loading => {
                table.add_row(vec![
                    Cell::new(host),
                    Cell::new("loading").fg(Color::Yellow),
                    Cell::new(EMPTY),
                    Cell::new(EMPTY),
                    Cell::new(EMPTY),
                    Cell::new(EMPTY),
                ]);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use mcsite_status::PlayerCounts;

    use super::*;

    fn snapshot() -> ServerStatusSnapshot {
        ServerStatusSnapshot {
            online: true,
            host: "play.example.com".to_string(),
            port: Some(25565),
            version: Some("1.20.1".to_string()),
            players: Some(PlayerCounts {
                online: 42,
                max: 100,
            }),
            latency: Some(35.4),
            motd: Some(vec!["  Welcome ".to_string(), String::new(), "Season 3".to_string()]),
        }
    }

    #[test]
    fn test_cell_values() {
        let snapshot = snapshot();
        assert_eq!(players(&snapshot), "42/100");
        assert_eq!(latency(&snapshot), "35 ms");
        assert_eq!(motd(&snapshot), "Welcome / Season 3");

        let unreachable = ServerStatusSnapshot::unreachable("down.example.com");
        assert_eq!(players(&unreachable), "-");
        assert_eq!(latency(&unreachable), "-");
        assert_eq!(motd(&unreachable), "-");
    }

    #[test]
    fn test_snapshot_table_lists_every_host() {
        let mut table = snapshot_table(&[
            snapshot(),
            ServerStatusSnapshot::unreachable("down.example.com"),
        ]);
        table.force_no_tty();
        let rendered = table.to_string();

        assert!(rendered.contains("play.example.com:25565"));
        assert!(rendered.contains("online"));
        assert!(rendered.contains("down.example.com"));
        assert!(rendered.contains("offline"));
    }

    #[test]
    fn test_view_table_marks_loading_hosts() {
        let ready = StatusView::Ready(snapshot());
        let loading = StatusView::Loading;
        let mut table = view_table([("play.example.com", &ready), ("hub.example.com", &loading)]);
        table.force_no_tty();
        let rendered = table.to_string();

        assert!(rendered.contains("42/100"));
        assert!(rendered.contains("hub.example.com"));
        assert!(rendered.contains("loading"));
    }
}
