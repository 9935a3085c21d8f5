//! Navigation entry <-> content panel coordination.

/// Where the widget is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostContext {
    Page,
    /// Rendered as a documentation code sample: no tab wiring, no theming.
    CodeSample,
}

impl HostContext {
    pub fn from_parent_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.eq_ignore_ascii_case("c-code-sample") => HostContext::CodeSample,
            _ => HostContext::Page,
        }
    }

    pub fn wires_tabs(&self) -> bool {
        matches!(self, HostContext::Page)
    }
}

pub fn pane_id(index: usize) -> String {
    format!("v-pills-{index}")
}

pub fn pane_href(index: usize) -> String {
    format!("#{}", pane_id(index))
}

pub fn pane_tab_id(index: usize) -> String {
    format!("{}-tab", pane_id(index))
}

/// Holds pane activations back until the panels are attached.
///
/// Only the most recent request survives; it is released once by
/// [`mark_ready`](Self::mark_ready).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabCoordinator {
    ready: bool,
    pending: Option<usize>,
}

impl TabCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pane to activate now, or `None` if it has to wait.
    pub fn request(&mut self, index: usize) -> Option<usize> {
        if self.ready {
            Some(index)
        } else {
            self.pending = Some(index);
            None
        }
    }

    /// Panels are attached; returns the request that was waiting, if any.
    pub fn mark_ready(&mut self) -> Option<usize> {
        self.ready = true;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_context() {
        assert_eq!(HostContext::from_parent_tag(Some("C-CODE-SAMPLE")), HostContext::CodeSample);
        assert_eq!(HostContext::from_parent_tag(Some("DIV")), HostContext::Page);
        assert_eq!(HostContext::from_parent_tag(None), HostContext::Page);
        assert!(!HostContext::CodeSample.wires_tabs());
    }

    #[test]
    fn test_pane_links() {
        assert_eq!(pane_href(3), "#v-pills-3");
        assert_eq!(pane_tab_id(3), "v-pills-3-tab");
        assert_eq!(pane_id(0), "v-pills-0");
    }

    #[test]
    fn test_requests_wait_for_ready() {
        let mut tabs = TabCoordinator::new();
        assert_eq!(tabs.request(1), None);
        assert_eq!(tabs.request(2), None);
        assert_eq!(tabs.mark_ready(), Some(2));
        assert_eq!(tabs.mark_ready(), None);
        assert_eq!(tabs.request(0), Some(0));
        assert_eq!(tabs.mark_ready(), None, "ready requests are not buffered");
    }
}
