// Pure command building functions (no I/O)

use std::path::{Path, PathBuf};

use crate::launch::types::{LaunchTarget, MOD_PATH_DELIMITER};
use crate::platform::HostOs;

/// Split `host:port` into its parts. A bare host has no port; IPv6 literals
/// must be bracketed to carry one (`[::1]:2302`).
pub fn split_server_address(address: &str) -> (&str, Option<u16>) {
    let address = address.trim();

    if let Some(rest) = address.strip_prefix('[')
        && let Some((host, tail)) = rest.split_once(']')
    {
        let port = tail.strip_prefix(':').and_then(|p| p.parse().ok());
        return (host, port);
    }

    match address.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (address, None),
        },
        _ => (address, None),
    }
}

/// Format a host path for a Windows game running under a compatibility layer.
pub fn compat_path(path: &Path) -> String {
    format!("Z:{}", path.to_string_lossy().replace('/', "\\"))
}

/// Arguments after the program, before extra parameters.
pub fn launch_args(ordered_paths: &[PathBuf], server_address: &str, compat_paths: bool) -> Vec<String> {
    let mut args = Vec::new();

    if !ordered_paths.is_empty() {
        let joined = ordered_paths
            .iter()
            .map(|p| {
                if compat_paths {
                    compat_path(p)
                } else {
                    p.to_string_lossy().into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(MOD_PATH_DELIMITER);
        args.push(format!("-mod={joined}"));
    }

    let (host, port) = split_server_address(server_address);
    if !host.is_empty() {
        args.push(format!("-connect={host}"));
    }
    if let Some(port) = port {
        args.push(format!("-port={port}"));
    }

    args
}

/// Build the single shell command line handed to the OS.
///
/// `extra_parameters` is user-configured shell text and is appended verbatim.
pub fn build_command_line(
    target: &LaunchTarget,
    ordered_paths: &[PathBuf],
    server_address: &str,
    extra_parameters: &str,
    os: HostOs,
    compat_paths: bool,
) -> String {
    let mut tokens: Vec<String> = match target {
        LaunchTarget::Direct { executable } => vec![executable.to_string_lossy().into_owned()],
        LaunchTarget::ViaClient { client, app_id } => {
            vec![client.clone(), "-applaunch".to_string(), app_id.to_string()]
        }
    };
    tokens.extend(launch_args(ordered_paths, server_address, compat_paths));

    let mut line = tokens
        .iter()
        .map(|t| quote_arg(t, os))
        .collect::<Vec<_>>()
        .join(" ");

    let extra = extra_parameters.trim();
    if !extra.is_empty() {
        line.push(' ');
        line.push_str(extra);
    }
    line
}

/// Quote one argument for the host shell, leaving plain tokens untouched.
pub fn quote_arg(arg: &str, os: HostOs) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=.,/:@%+".contains(c) || (os.is_windows() && c == '\\'));
    if plain {
        return arg.to_string();
    }

    if os.is_windows() {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn via_steam() -> LaunchTarget {
        LaunchTarget::ViaClient {
            client: "steam".to_string(),
            app_id: 221100,
        }
    }

    // ── split_server_address ──

    #[test]
    fn host_and_port() {
        assert_eq!(split_server_address("1.2.3.4:2302"), ("1.2.3.4", Some(2302)));
    }

    #[test]
    fn bare_host() {
        assert_eq!(split_server_address("dayz.example.org"), ("dayz.example.org", None));
    }

    #[test]
    fn bracketed_ipv6() {
        assert_eq!(split_server_address("[::1]:2402"), ("::1", Some(2402)));
        assert_eq!(split_server_address("fe80::1"), ("fe80::1", None));
    }

    #[test]
    fn bad_port_keeps_whole_address() {
        assert_eq!(split_server_address("host:abc"), ("host:abc", None));
    }

    // ── build_command_line ──

    #[test]
    fn linux_line_through_steam_with_compat_paths() {
        let paths = vec![
            PathBuf::from("/home/u/.steam/steam/steamapps/workshop/content/221100/1"),
            PathBuf::from("/home/u/.steam/steam/steamapps/workshop/content/221100/2"),
        ];
        let line = build_command_line(&via_steam(), &paths, "1.2.3.4:2302", "", HostOs::Linux, true);
        assert_eq!(
            line,
            r"steam -applaunch 221100 '-mod=Z:\home\u\.steam\steam\steamapps\workshop\content\221100\1;Z:\home\u\.steam\steam\steamapps\workshop\content\221100\2' -connect=1.2.3.4 -port=2302"
        );
    }

    #[test]
    fn mod_order_is_preserved() {
        let paths = vec![PathBuf::from("/w/B"), PathBuf::from("/w/A")];
        let line = build_command_line(&via_steam(), &paths, "h", "", HostOs::Linux, false);
        assert!(line.contains("'-mod=/w/B;/w/A'"), "{line}");
    }

    #[test]
    fn no_mods_means_no_mod_arg() {
        let line = build_command_line(&via_steam(), &[], "h:1", "", HostOs::Linux, true);
        assert_eq!(line, "steam -applaunch 221100 -connect=h -port=1");
    }

    #[test]
    fn windows_direct_quotes_only_what_needs_it() {
        let target = LaunchTarget::Direct {
            executable: PathBuf::from(r"C:\Program Files (x86)\Steam\steamapps\common\DayZ\DayZ_x64.exe"),
        };
        let paths = vec![PathBuf::from(r"C:\Steam\workshop\1")];
        let line = build_command_line(&target, &paths, "5.6.7.8:2402", " -nosplash -world=empty ", HostOs::Windows, false);
        assert_eq!(
            line,
            r#""C:\Program Files (x86)\Steam\steamapps\common\DayZ\DayZ_x64.exe" -mod=C:\Steam\workshop\1 -connect=5.6.7.8 -port=2402 -nosplash -world=empty"#
        );
    }

    #[test]
    fn posix_quote_escapes_single_quote() {
        assert_eq!(quote_arg("it's", HostOs::Linux), r"'it'\''s'");
        assert_eq!(quote_arg("", HostOs::Linux), "''");
    }
}
