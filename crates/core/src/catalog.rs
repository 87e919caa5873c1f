//! Built-in action table.
//!
//! Fallback chains are plain data. Reordering or dropping a candidate is an
//! edit here (or in the user's config file), never a change to the launcher.

use crate::types::{ActionEntry, CandidateTemplate, Category};

/// Terminal emulators in preference order, with the flag that introduces the
/// command to run inside them.
const TERMINALS: &[(&str, &[&str])] = &[
    ("kitty", &["-e"]),
    ("alacritty", &["-e"]),
    ("gnome-terminal", &["--"]),
    ("xterm", &["-e"]),
];

/// Same as [`TERMINALS`] but keeping the window open after the command exits.
const HOLDING_TERMINALS: &[(&str, &[&str])] = &[
    ("kitty", &["--hold", "-e"]),
    ("alacritty", &["--hold", "-e"]),
    ("xterm", &["-hold", "-e"]),
];

const CONFIG_FILES: &[(&str, &str, &str)] = &[
    ("edit_hyprland_conf", "Hyprland", ".config/hypr/hyprland.conf"),
    ("edit_hyprpaper_conf", "Hyprpaper", ".config/hypr/hyprpaper.conf"),
    ("edit_waybar_config", "Waybar Config", ".config/waybar/config"),
    ("edit_waybar_style", "Waybar Style", ".config/waybar/style.css"),
    ("edit_kitty_conf", "Kitty", ".config/kitty/kitty.conf"),
    ("edit_mangohud_conf", "MangoHud", ".config/MangoHud/MangoHud.conf"),
    ("edit_fastfetch_conf", "Fastfetch", ".config/fastfetch/fastfetch.jsonc"),
];

/// Package managers and the privileged command line each one updates with.
const PACKAGE_MANAGERS: &[(&str, &[&str])] = &[
    ("pacman", &["sudo", "pacman", "-Syu"]),
    ("apt", &["sh", "-c", "sudo apt update && sudo apt upgrade -y"]),
    ("dnf", &["sudo", "dnf", "update", "-y"]),
    ("zypper", &["sudo", "zypper", "update"]),
];

fn in_terminals(terminals: &[(&str, &[&str])], command: &[&str]) -> Vec<CandidateTemplate> {
    terminals
        .iter()
        .map(|(terminal, flags)| {
            CandidateTemplate::new(terminal, flags.iter().chain(command.iter()).copied())
        })
        .collect()
}

fn apps(programs: &[&str]) -> Vec<CandidateTemplate> {
    programs.iter().map(|p| CandidateTemplate::bare(p)).collect()
}

fn editor_chain(path: &str) -> Vec<CandidateTemplate> {
    let target = format!("{{home}}/{path}");
    let target = target.as_str();
    vec![
        CandidateTemplate::new("kitty", ["-e", "vim", target]).requiring(["vim"]),
        CandidateTemplate::new("alacritty", ["-e", "vim", target]).requiring(["vim"]),
        CandidateTemplate::new("gnome-terminal", ["--", "vim", target]).requiring(["vim"]),
        CandidateTemplate::new("gnome-terminal", ["--", "nano", target]).requiring(["nano"]),
        CandidateTemplate::new("xterm", ["-e", "vi", target]).requiring(["vi"]),
    ]
}

fn system_info() -> ActionEntry {
    let mut candidates = Vec::new();
    for fetch in ["fastfetch", "neofetch"] {
        candidates.extend(
            in_terminals(HOLDING_TERMINALS, &[fetch])
                .into_iter()
                .map(|c| c.requiring([fetch])),
        );
    }
    ActionEntry::new("system_info", "System Information", Category::Info, candidates)
}

fn system_update() -> ActionEntry {
    let candidates = PACKAGE_MANAGERS
        .iter()
        .flat_map(|(manager, command)| {
            in_terminals(TERMINALS, command)
                .into_iter()
                .map(move |c| c.requiring([*manager]))
        })
        .collect();
    ActionEntry::new("system_update", "System Update", Category::System, candidates)
}

/// The default action table, in menu order.
pub fn builtin_entries() -> Vec<ActionEntry> {
    let mut entries = vec![
        system_info(),
        ActionEntry::new(
            "view_image",
            "View Image",
            Category::Pictures,
            vec![CandidateTemplate::new("feh", ["{pictures}/{arg}"])],
        )
        .with_argument(),
    ];

    entries.extend(
        CONFIG_FILES
            .iter()
            .map(|(id, label, path)| ActionEntry::new(id, label, Category::Configs, editor_chain(path))),
    );

    entries.extend([
        ActionEntry::new(
            "launch_terminal",
            "Terminal",
            Category::Applications,
            apps(&["kitty", "alacritty", "gnome-terminal", "xterm"]),
        ),
        ActionEntry::new(
            "launch_browser",
            "Browser",
            Category::Applications,
            apps(&["firefox", "chromium", "brave"]),
        ),
        ActionEntry::new("launch_steam", "Launcher", Category::Applications, apps(&["steam"])),
        ActionEntry::new("launch_obs", "OBS", Category::Applications, apps(&["obs"])),
        ActionEntry::new(
            "launch_files",
            "Files",
            Category::Applications,
            apps(&["nautilus", "thunar", "dolphin"]),
        ),
    ]);

    entries.extend([
        system_update(),
        ActionEntry::new(
            "reboot",
            "Reboot",
            Category::System,
            vec![
                CandidateTemplate::new("systemctl", ["reboot"]),
                CandidateTemplate::new("loginctl", ["reboot"]),
            ],
        )
        .confirmed(),
        ActionEntry::new(
            "shutdown",
            "Shutdown",
            Category::System,
            vec![
                CandidateTemplate::new("systemctl", ["poweroff"]),
                CandidateTemplate::new("loginctl", ["poweroff"]),
            ],
        )
        .confirmed(),
        ActionEntry::new(
            "open_audio_settings",
            "Audio Settings",
            Category::System,
            apps(&["pavucontrol", "pwvucontrol"]),
        ),
        ActionEntry::new("open_network_settings", "Network Settings", Category::System, {
            let mut chain = apps(&["nm-connection-editor"]);
            chain.extend(
                in_terminals(TERMINALS, &["nmtui"])
                    .into_iter()
                    .map(|c| c.requiring(["nmtui"])),
            );
            chain
        }),
        ActionEntry::new(
            "open_display_settings",
            "Display Settings",
            Category::System,
            apps(&["nwg-displays", "wdisplays"]),
        ),
        ActionEntry::new(
            "open_appearance_settings",
            "Appearance Settings",
            Category::System,
            apps(&["nwg-look", "lxappearance"]),
        ),
        ActionEntry::new(
            "open_bluetooth_settings",
            "Bluetooth Settings",
            Category::System,
            apps(&["blueman-manager", "blueberry"]),
        ),
    ]);

    entries
}
