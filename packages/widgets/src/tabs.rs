//! Login/signup tab switching

use tracing::debug;

pub const TAB_ACTIVE_CLASS: &str = "auth__tab--active";
pub const PANEL_HIDDEN_CLASS: &str = "auth__form-panel--hidden";

/// One visible change the bindings must apply, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSwitch {
    /// Set `auth__tab--active` and `aria-selected` on a tab button
    SelectTab { tab: usize, selected: bool },
    /// Add the hidden class to the outgoing panel; set `display: none`
    /// once its transition ends
    HidePanel { panel_id: String },
    /// Set `display: block`, then drop the hidden class a frame later
    ShowPanel { panel_id: String },
}

/// Tab buttons and the panel each one controls (`aria-controls`)
#[derive(Debug, Clone, Default)]
pub struct AuthTabs {
    controls: Vec<Option<String>>,
    visible_panel: Option<String>,
}

impl AuthTabs {
    /// `controls[i]` is tab `i`'s `aria-controls`; `visible_panel` is the
    /// panel not carrying the hidden class at load
    pub fn new(controls: Vec<Option<String>>, visible_panel: Option<String>) -> Self {
        Self {
            controls,
            visible_panel,
        }
    }

    pub fn visible_panel(&self) -> Option<&str> {
        self.visible_panel.as_deref()
    }

    /// Activate tab `index`
    ///
    /// Nothing happens when the tab has no `aria-controls` or its panel
    /// does not exist (`panel_exists` answers for the page).
    pub fn activate(&mut self, index: usize, panel_exists: impl Fn(&str) -> bool) -> Vec<TabSwitch> {
        let Some(Some(target)) = self.controls.get(index).cloned() else {
            return Vec::new();
        };
        if !panel_exists(&target) {
            debug!(panel = %target, "Tab target panel not found");
            return Vec::new();
        }

        let mut changes: Vec<TabSwitch> = (0..self.controls.len())
            .map(|tab| TabSwitch::SelectTab {
                tab,
                selected: false,
            })
            .collect();
        changes.push(TabSwitch::SelectTab {
            tab: index,
            selected: true,
        });

        if let Some(current) = self.visible_panel.take() {
            if current != target {
                changes.push(TabSwitch::HidePanel { panel_id: current });
            }
        }
        changes.push(TabSwitch::ShowPanel {
            panel_id: target.clone(),
        });
        self.visible_panel = Some(target);
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> AuthTabs {
        AuthTabs::new(
            vec![Some("login_panel".into()), Some("signup_panel".into()), None],
            Some("login_panel".into()),
        )
    }

    #[test]
    fn test_switch_hides_current_and_shows_target() {
        let mut tabs = tabs();
        let changes = tabs.activate(1, |_| true);

        assert_eq!(
            changes,
            vec![
                TabSwitch::SelectTab { tab: 0, selected: false },
                TabSwitch::SelectTab { tab: 1, selected: false },
                TabSwitch::SelectTab { tab: 2, selected: false },
                TabSwitch::SelectTab { tab: 1, selected: true },
                TabSwitch::HidePanel { panel_id: "login_panel".into() },
                TabSwitch::ShowPanel { panel_id: "signup_panel".into() },
            ]
        );
        assert_eq!(tabs.visible_panel(), Some("signup_panel"));
    }

    #[test]
    fn test_reactivating_visible_panel_does_not_hide_it() {
        let mut tabs = tabs();
        let changes = tabs.activate(0, |_| true);
        assert!(!changes.iter().any(|c| matches!(c, TabSwitch::HidePanel { .. })));
        assert_eq!(
            changes.last(),
            Some(&TabSwitch::ShowPanel { panel_id: "login_panel".into() })
        );
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut tabs = tabs();
        assert!(tabs.activate(2, |_| true).is_empty());
        assert!(tabs.activate(7, |_| true).is_empty());
        assert!(tabs.activate(1, |_| false).is_empty());
        assert_eq!(tabs.visible_panel(), Some("login_panel"));
    }
}
