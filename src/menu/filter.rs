use std::fmt;
use std::sync::Arc;

use log::trace;

use super::option::MenuOption;
use super::popup::PopupId;

/// Predicate deciding whether an option stays visible.
pub type OptionPredicate = Arc<dyn Fn(&dyn MenuOption) -> bool + Send + Sync>;

/// A request to filter an option list.
#[derive(Clone)]
pub struct FilterRequest {
    pub predicate: OptionPredicate,
    /// Show every option regardless of the predicate.
    pub reset: bool,
    /// Descend into sub-menus: keep a sub-menu whose children match and
    /// forward the request to it.
    pub recursive: bool,
}

impl FilterRequest {
    pub fn new(
        predicate: impl Fn(&dyn MenuOption) -> bool + Send + Sync + 'static,
        reset: bool,
        recursive: bool,
    ) -> Self {
        Self {
            predicate: Arc::new(predicate),
            reset,
            recursive,
        }
    }

    /// A request showing every option again.
    pub fn reset(recursive: bool) -> Self {
        Self::new(|_| true, true, recursive)
    }
}

impl fmt::Debug for FilterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRequest")
            .field("reset", &self.reset)
            .field("recursive", &self.recursive)
            .finish_non_exhaustive()
    }
}

/// An option list with a visible subset.
///
/// The list is only filtered while attached to an open popup. Requests made
/// while detached are kept and applied on the next [`OptionListFilter::attach`],
/// and the last applied request is replayed when the list is re-attached.
#[derive(Default)]
pub struct OptionListFilter {
    options: Vec<Box<dyn MenuOption>>,
    visible: Vec<usize>,
    attached: Option<PopupId>,
    pending: Option<FilterRequest>,
    last: Option<FilterRequest>,
    needs_resize: bool,
}

impl OptionListFilter {
    pub fn new(options: Vec<Box<dyn MenuOption>>) -> Self {
        let visible = (0..options.len()).collect();
        Self {
            options,
            visible,
            ..Self::default()
        }
    }

    /// Bind the list to an open popup, showing every option and then applying
    /// any request made while detached.
    pub fn attach(&mut self, popup: PopupId) {
        self.attached = Some(popup);
        self.visible = (0..self.options.len()).collect();
        self.needs_resize = true;
        if let Some(request) = self.pending.take() {
            trace!("applying deferred filter to popup {popup}");
            self.filter(request);
        }
    }

    /// Unbind from the popup. The last request is kept for the next attach.
    pub fn detach(&mut self) {
        self.attached = None;
        if self.pending.is_none() {
            self.pending = self.last.take();
        }
    }

    pub fn attached_to(&self) -> Option<PopupId> {
        self.attached
    }

    pub fn is_attached(&self) -> bool {
        self.attached.is_some()
    }

    /// Filter the list, or store the request while detached.
    pub fn filter(&mut self, request: FilterRequest) {
        if self.attached.is_none() {
            self.pending = Some(request);
            return;
        }

        let predicate = request.predicate.clone();
        let mut visible = Vec::with_capacity(self.options.len());
        for (index, option) in self.options.iter_mut().enumerate() {
            let matched = request.reset || predicate(option.as_ref());
            let keep = matched
                || (request.recursive && option.any_matches(predicate.as_ref(), true));
            if !keep {
                continue;
            }
            if request.recursive {
                option.filter_sub_menu(FilterRequest {
                    predicate: predicate.clone(),
                    reset: matched,
                    recursive: true,
                });
            }
            visible.push(index);
        }

        trace!(
            "filtered {} of {} options (reset: {}, recursive: {})",
            visible.len(),
            self.options.len(),
            request.reset,
            request.recursive
        );
        self.visible = visible;
        self.last = Some(request);
        self.needs_resize = true;
    }

    pub fn options(&self) -> &[Box<dyn MenuOption>] {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut [Box<dyn MenuOption>] {
        &mut self.options
    }

    /// Visible options in display order.
    pub fn visible(&self) -> impl Iterator<Item = &dyn MenuOption> + '_ {
        self.visible.iter().filter_map(|i| self.options.get(*i)).map(|o| o.as_ref())
    }

    pub fn visible_labels(&self) -> Vec<String> {
        self.visible().map(|o| o.label().to_owned()).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub(crate) fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Whether the visible set changed since the last call.
    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.needs_resize)
    }

    /// Re-order the options, keeping every option visible.
    pub(crate) fn sort_by(
        &mut self,
        compare: impl FnMut(&Box<dyn MenuOption>, &Box<dyn MenuOption>) -> std::cmp::Ordering,
    ) {
        self.options.sort_by(compare);
        self.visible = (0..self.options.len()).collect();
        self.needs_resize = true;
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl From<Vec<Box<dyn MenuOption>>> for OptionListFilter {
    fn from(options: Vec<Box<dyn MenuOption>>) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use egui::Rect;

    use super::*;
    use crate::menu::MenuCx;
    use crate::menu::option::{HostMenu, OptionRow};

    struct Row(OptionRow);

    impl MenuOption for Row {
        fn row(&self) -> &OptionRow {
            &self.0
        }

        fn row_mut(&mut self) -> &mut OptionRow {
            &mut self.0
        }

        fn render(&mut self, _rect: Rect, _menu: &HostMenu, _cx: &mut MenuCx<'_>) -> bool {
            false
        }
    }

    fn list(labels: &[&str]) -> OptionListFilter {
        OptionListFilter::new(
            labels
                .iter()
                .map(|l| Box::new(Row(OptionRow::new(*l))) as Box<dyn MenuOption>)
                .collect(),
        )
    }

    fn starts_with(prefix: &'static str) -> FilterRequest {
        FilterRequest::new(move |o| o.label().starts_with(prefix), false, false)
    }

    #[test]
    fn test_filter_keeps_matching_options() {
        let mut filter = list(&["apple", "avocado", "banana"]);
        filter.attach(PopupId::next());
        filter.filter(starts_with("a"));
        assert_eq!(filter.visible_labels(), ["apple", "avocado"]);
        assert!(filter.take_resize());
        assert!(!filter.take_resize());
    }

    #[test]
    fn test_reset_shows_everything() {
        let mut filter = list(&["apple", "banana"]);
        filter.attach(PopupId::next());
        filter.filter(starts_with("a"));
        filter.filter(FilterRequest::reset(false));
        assert_eq!(filter.visible_count(), 2);
    }

    #[test]
    fn test_request_while_detached_is_deferred() {
        let mut filter = list(&["apple", "banana"]);
        filter.filter(starts_with("b"));
        assert_eq!(filter.visible_count(), 2);

        filter.attach(PopupId::next());
        assert_eq!(filter.visible_labels(), ["banana"]);
    }

    #[test]
    fn test_last_request_replays_on_reattach() {
        let mut filter = list(&["apple", "banana"]);
        filter.attach(PopupId::next());
        filter.filter(starts_with("b"));
        filter.detach();
        assert!(!filter.is_attached());

        filter.attach(PopupId::next());
        assert_eq!(filter.visible_labels(), ["banana"]);
    }
}
