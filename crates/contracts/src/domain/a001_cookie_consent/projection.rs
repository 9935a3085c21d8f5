//! View model -> declarative widget tree.
//!
//! The tree carries every decision the markup depends on (labels, controls,
//! active classes), so the view only walks it.

use super::category::Category;
use super::config::{Backdrop, WidgetConfig};
use super::machine::ViewModel;
use super::tabs::{pane_href, pane_id, pane_tab_id};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetTree {
    pub modal: ModalNode,
    pub footer: FooterNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalNode {
    pub open: bool,
    pub backdrop: Backdrop,
    pub inline: bool,
    pub headline: String,
    pub nav_active: bool,
    /// First category's overview, repeated above the navigation on narrow screens.
    pub intro: Option<IntroBlock>,
    pub nav: Vec<NavEntry>,
    pub panels: Vec<PanelNode>,
    pub back_label: String,
    pub cancel_label: String,
    pub save_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroBlock {
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub index: usize,
    pub href: String,
    pub tab_id: String,
    pub label: String,
    pub active: bool,
    /// Hidden on narrow screens, where the intro block replaces it.
    pub wide_only: bool,
    pub control: NavControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavControl {
    None,
    /// Mandatory decision, submitted but not editable.
    HiddenInput { name: String, checked: bool },
    Switch { name: String, checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelNode {
    pub index: usize,
    pub id: String,
    pub labelled_by: String,
    pub title: String,
    pub content_html: String,
    pub active: bool,
    pub control: PanelControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelControl {
    /// Shown on narrow screens only.
    Switch { name: String, checked: bool },
    /// Locked panels: `"Active"` when accepted, empty otherwise.
    Badge(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterNode {
    Banner {
        inline: bool,
        settings_label: String,
        accept_label: String,
    },
    /// Keeps the host's `main` slot mounted but invisible.
    Hidden,
}

pub const ACTIVE_BADGE: &str = "Active";

pub fn project(vm: &ViewModel, config: &WidgetConfig) -> WidgetTree {
    let intro = vm.items.first().and_then(|first| {
        first.description.as_ref().map(|html| IntroBlock {
            title: first.title.clone(),
            html: html.clone(),
        })
    });

    let nav = vm
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| NavEntry {
            index,
            href: pane_href(index),
            tab_id: pane_tab_id(index),
            label: item.title.clone(),
            active: index == vm.active_pane,
            wide_only: index == 0,
            control: nav_control(item),
        })
        .collect();

    let panels = vm
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| PanelNode {
            index,
            id: pane_id(index),
            labelled_by: pane_tab_id(index),
            title: item.title.clone(),
            content_html: item.content.clone(),
            active: index == vm.active_pane,
            control: panel_control(item),
        })
        .collect();

    let footer = if vm.consent_given {
        FooterNode::Hidden
    } else {
        FooterNode::Banner {
            inline: config.inline,
            settings_label: config.main_button_secondary.clone(),
            accept_label: config.main_button_primary.clone(),
        }
    };

    WidgetTree {
        modal: ModalNode {
            open: vm.open,
            backdrop: config.backdrop(),
            inline: config.inline,
            headline: config.headline.clone(),
            nav_active: vm.nav_active,
            intro,
            nav,
            panels,
            back_label: config.back_label.clone(),
            cancel_label: config.modal_button_secondary.clone(),
            save_label: config.modal_button_primary.clone(),
        },
        footer,
    }
}

fn nav_control(item: &Category) -> NavControl {
    let name = item.key().to_string();
    if !item.toggable {
        NavControl::None
    } else if item.mandatory {
        NavControl::HiddenInput {
            name,
            checked: item.checked,
        }
    } else {
        NavControl::Switch {
            name,
            checked: item.checked,
        }
    }
}

fn panel_control(item: &Category) -> PanelControl {
    if item.is_locked() {
        PanelControl::Badge(if item.checked {
            ACTIVE_BADGE.to_string()
        } else {
            String::new()
        })
    } else {
        PanelControl::Switch {
            name: item.key().to_string(),
            checked: item.checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_cookie_consent::category::CategoryDeclaration;
    use crate::domain::a001_cookie_consent::machine::ConsentMachine;

    fn machine() -> ConsentMachine {
        let mut machine = ConsentMachine::new(&WidgetConfig::default());
        machine.seed(
            &[
                CategoryDeclaration {
                    text: "Necessary".into(),
                    intro: Some("<p>We use cookies.</p>".into()),
                    toggable: false,
                    mandatory: true,
                    checked: true,
                    content: "<div>necessary</div>".into(),
                    ..Default::default()
                },
                CategoryDeclaration {
                    text: "Strictly required".into(),
                    toggable: true,
                    mandatory: true,
                    checked: true,
                    ..Default::default()
                },
                CategoryDeclaration {
                    text: "Analytics".into(),
                    kind: Some("analytics".into()),
                    toggable: true,
                    ..Default::default()
                },
            ],
            None,
        );
        machine
    }

    #[test]
    fn test_banner_until_consent() {
        let config = WidgetConfig::default();
        let tree = project(&machine().view_model(), &config);
        assert_eq!(
            tree.footer,
            FooterNode::Banner {
                inline: false,
                settings_label: "Cookie settings".into(),
                accept_label: "Accept".into(),
            }
        );

        let mut vm = machine().view_model();
        vm.consent_given = true;
        assert_eq!(project(&vm, &config).footer, FooterNode::Hidden);
    }

    #[test]
    fn test_navigation_controls() {
        let tree = project(&machine().view_model(), &WidgetConfig::default());
        let nav = &tree.modal.nav;
        assert_eq!(nav.len(), 3);
        assert_eq!(nav[0].control, NavControl::None);
        assert!(nav[0].wide_only && nav[0].active);
        assert_eq!(
            nav[1].control,
            NavControl::HiddenInput {
                name: "StrictlyRequired".into(),
                checked: true
            }
        );
        assert_eq!(
            nav[2].control,
            NavControl::Switch {
                name: "analytics".into(),
                checked: false
            }
        );
        assert_eq!(nav[2].href, "#v-pills-2");
    }

    #[test]
    fn test_panels_and_badges() {
        let mut m = machine();
        m.select_pane(2);
        let tree = project(&m.view_model(), &WidgetConfig::default());
        let panels = &tree.modal.panels;
        assert_eq!(panels[0].control, PanelControl::Badge("Active".into()));
        assert_eq!(panels[1].control, PanelControl::Badge("Active".into()));
        assert!(matches!(panels[2].control, PanelControl::Switch { checked: false, .. }));
        assert_eq!(panels[0].content_html, "<div>necessary</div>");
        assert!(panels[2].active && !panels[0].active);
        assert!(tree.modal.nav_active);
    }

    #[test]
    fn test_intro_block_and_labels() {
        let config = WidgetConfig {
            inline: true,
            ..WidgetConfig::default()
        };
        let tree = project(&machine().view_model(), &config);
        assert_eq!(
            tree.modal.intro,
            Some(IntroBlock {
                title: "Necessary".into(),
                html: "<p>We use cookies.</p>".into()
            })
        );
        assert_eq!(tree.modal.backdrop, Backdrop::Hidden);
        assert_eq!(tree.modal.save_label, "Save preferences");
        assert_eq!(tree.modal.cancel_label, "Cancel");
    }

    #[test]
    fn test_empty_widget_renders() {
        let mut m = ConsentMachine::new(&WidgetConfig::default());
        m.seed(&[], None);
        let tree = project(&m.view_model(), &WidgetConfig::default());
        assert!(tree.modal.nav.is_empty());
        assert!(tree.modal.panels.is_empty());
        assert_eq!(tree.modal.intro, None);
    }
}
