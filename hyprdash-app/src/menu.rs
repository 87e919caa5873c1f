//! Numbered text menu: read a choice, dispatch it, redraw until Exit.

use std::sync::Arc;

use hyprdash_core::{ActionId, Category, LaunchError};
use hyprdash_executor::Dispatcher;
use hyprdash_interfaces::Interface;

use crate::gallery;
use crate::summary::SystemSummary;

const VIEW_IMAGE: &str = "view_image";
const SYSTEM_INFO: &str = "system_info";

static EXIT: MenuItem = MenuItem::Exit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Action {
        id: ActionId,
        label: String,
        confirm: bool,
    },
    Pictures,
    Summary,
    Exit,
}

impl MenuItem {
    pub fn label(&self) -> &str {
        match self {
            MenuItem::Action { label, .. } => label,
            MenuItem::Pictures => "View Pictures",
            MenuItem::Summary => "System Summary",
            MenuItem::Exit => "Exit",
        }
    }
}

pub struct Menu {
    ui: Arc<dyn Interface>,
    dispatcher: Arc<Dispatcher>,
    sections: Vec<(Category, Vec<MenuItem>)>,
}

impl Menu {
    pub fn new(ui: Arc<dyn Interface>, dispatcher: Arc<Dispatcher>) -> Self {
        let sections = build_sections(&dispatcher);
        Self {
            ui,
            dispatcher,
            sections,
        }
    }

    /// Items in display order; item `n` is chosen by typing `n + 1`.
    pub fn items(&self) -> Vec<&MenuItem> {
        self.sections
            .iter()
            .flat_map(|(_, items)| items.iter())
            .chain(std::iter::once(&EXIT))
            .collect()
    }

    pub async fn run(&self) {
        loop {
            self.render().await;
            self.ui.prompt("Enter your choice: ").await;

            let Some(input) = self.ui.receive_input().await else {
                break;
            };
            if input.is_empty() {
                continue;
            }
            if matches!(input.as_str(), "q" | "quit" | "exit") {
                break;
            }

            let items = self.items();
            let choice = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| items.get(n).copied());

            match choice {
                None => {
                    self.ui
                        .send_output("Invalid option. Please try again.")
                        .await
                }
                Some(MenuItem::Exit) => break,
                Some(MenuItem::Summary) => self.show_summary().await,
                Some(MenuItem::Pictures) => self.pictures().await,
                Some(MenuItem::Action { id, label, confirm }) => {
                    if *confirm && !self.ui.request_approval(label).await {
                        self.ui.show_status("Cancelled.").await;
                        continue;
                    }
                    self.run_action(id.as_str(), None).await;
                }
            }
        }
    }

    async fn render(&self) {
        self.ui.send_output("Menu:").await;
        let mut number = 1;
        for (category, items) in &self.sections {
            self.ui.send_output(&format!("[{}]", category.title())).await;
            for item in items {
                self.ui
                    .send_output(&format!("{}) {}", number, item.label()))
                    .await;
                number += 1;
            }
        }
        self.ui
            .send_output(&format!("{}) {}", number, EXIT.label()))
            .await;
    }

    async fn run_action(&self, id: &str, argument: Option<&str>) {
        match self.dispatcher.dispatch_with(id, argument) {
            Ok(started) => {
                let pid = started
                    .pid
                    .map(|pid| format!(" (pid {pid})"))
                    .unwrap_or_default();
                self.ui
                    .show_status(&format!("Started {}{}", started.program, pid))
                    .await;
            }
            Err(e) => {
                self.ui.show_error(&e.to_string()).await;
                if id == SYSTEM_INFO && matches!(e, LaunchError::AllCandidatesExhausted { .. }) {
                    self.show_summary().await;
                }
            }
        }
    }

    async fn show_summary(&self) {
        let summary = tokio::task::spawn_blocking(SystemSummary::capture).await;
        match summary {
            Ok(summary) => {
                for line in summary.to_lines() {
                    self.ui.send_output(&line).await;
                }
            }
            Err(e) => self.ui.show_error(&format!("System summary failed: {e}")).await,
        }
    }

    async fn pictures(&self) {
        let dir = match self.dispatcher.env().image_dir() {
            Ok(dir) => dir.to_path_buf(),
            Err(e) => {
                self.ui.show_error(&e.to_string()).await;
                return;
            }
        };

        let images = match gallery::list_images(&dir) {
            Ok(images) => images,
            Err(e) => {
                self.ui
                    .show_error(&format!("Could not open {}: {}", dir.display(), e))
                    .await;
                return;
            }
        };

        if images.is_empty() {
            self.ui
                .send_output(&format!("No images found in {}.", dir.display()))
                .await;
            return;
        }

        self.ui.send_output("Choose an image to view:").await;
        for (i, name) in images.iter().enumerate() {
            self.ui.send_output(&format!("{}) {}", i + 1, name)).await;
        }
        self.ui
            .prompt("Enter the number of the image to view (or 0 to go back): ")
            .await;

        let Some(input) = self.ui.receive_input().await else {
            return;
        };
        match input.parse::<usize>() {
            Ok(0) => {}
            Ok(n) if n <= images.len() => {
                self.run_action(VIEW_IMAGE, Some(&images[n - 1])).await;
            }
            _ => {
                self.ui
                    .send_output("Invalid option. Please try again.")
                    .await
            }
        }
    }
}

fn build_sections(dispatcher: &Dispatcher) -> Vec<(Category, Vec<MenuItem>)> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let mut items: Vec<MenuItem> = dispatcher
                .actions()
                .iter()
                .filter(|entry| entry.category == category && !entry.takes_argument)
                .map(|entry| MenuItem::Action {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                    confirm: entry.confirm,
                })
                .collect();

            match category {
                Category::Info => items.push(MenuItem::Summary),
                Category::Pictures if dispatcher.entry(VIEW_IMAGE).is_some() => {
                    items.insert(0, MenuItem::Pictures)
                }
                _ => {}
            }

            (!items.is_empty()).then_some((category, items))
        })
        .collect()
}
