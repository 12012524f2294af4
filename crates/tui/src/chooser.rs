//! Cascading backlog chooser.
//!
//! Three multi-select lists: products, projects, and iterations. Selecting
//! products fills the project list with their sub-backlogs, selecting
//! projects fills the iteration list. The chooser performs no I/O: every
//! operation that needs data returns a [`FetchRequest`], and the caller feeds
//! the matching [`FetchResponse`] back through [`BacklogChooser::apply`].
//!
//! Each list has a generation counter. Clearing a list or requesting its
//! contents again bumps the counter, so a response that arrives after its
//! list moved on is recognised by its token and dropped.

use std::collections::HashSet;

use sprintboard_config::ChooserSettings;
use sprintboard_protocol::{
    BacklogId, BacklogLevel, BacklogSummary, FetchRequest, FetchResponse, FetchToken,
};
use tracing::{debug, instrument};

/// Text of the only product option when the server has no products.
pub const NO_PRODUCTS_LABEL: &str = "There are no Products in the system.";

/// Text of the only option of a child list whose parents have no children.
pub const NO_BACKLOGS_LABEL: &str = "No backlogs found";

/// Text of the option standing for every entry of a child list.
pub const SELECT_ALL_LABEL: &str = "Select all";

/// What an option of a select list stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// A real backlog.
    Backlog(BacklogId),
    /// Every entry of the list.
    SelectAll,
    /// The parents have no children.
    NoneFound,
    /// Informational text; no value.
    Placeholder,
}

impl Choice {
    /// Returns the submitted value: the backlog id, `-1` for "Select all",
    /// `-2` for "No backlogs found", and nothing for a placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_tui::chooser::Choice;
    ///
    /// assert_eq!(Choice::Backlog(12).value(), Some(12));
    /// assert_eq!(Choice::SelectAll.value(), Some(-1));
    /// assert_eq!(Choice::NoneFound.value(), Some(-2));
    /// assert_eq!(Choice::Placeholder.value(), None);
    /// ```
    #[must_use]
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Backlog(id) => Some(i64::try_from(id).unwrap_or(i64::MAX)),
            Self::SelectAll => Some(-1),
            Self::NoneFound => Some(-2),
            Self::Placeholder => None,
        }
    }

    /// Returns `true` if the user can select the option.
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Backlog(_) | Self::SelectAll)
    }
}

/// One option of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// What the option stands for.
    pub choice: Choice,
    /// Display text.
    pub label: String,
    /// Whether the option is selected.
    pub selected: bool,
}

impl SelectOption {
    fn new(choice: Choice, label: impl Into<String>, selected: bool) -> Self {
        Self {
            choice,
            label: label.into(),
            selected,
        }
    }
}

/// A multi-select list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectList {
    options: Vec<SelectOption>,
    visible: bool,
    cursor: usize,
}

impl SelectList {
    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Returns `true` if the list is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the index of the option under the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the ids of the selected backlogs, without sentinels.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<BacklogId> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .filter_map(|option| match option.choice {
                Choice::Backlog(id) if id > 0 => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if "Select all" is selected.
    #[must_use]
    pub fn is_select_all(&self) -> bool {
        self.options
            .iter()
            .any(|option| option.choice == Choice::SelectAll && option.selected)
    }

    fn clear(&mut self) {
        self.options.clear();
        self.cursor = 0;
    }

    fn hide(&mut self) {
        self.clear();
        self.visible = false;
    }

    fn show(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.cursor = self.cursor.min(self.options.len().saturating_sub(1));
        self.visible = true;
    }

    fn deselect_concrete(&mut self) {
        for option in &mut self.options {
            if option.choice != Choice::SelectAll {
                option.selected = false;
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let last = self.options.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }
}

/// The backlogs chosen at every level, as submitted with a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChooserSelection {
    /// Selected products.
    pub product_ids: Vec<BacklogId>,
    /// Selected projects.
    pub project_ids: Vec<BacklogId>,
    /// Selected iterations.
    pub iteration_ids: Vec<BacklogId>,
}

impl ChooserSelection {
    /// Returns the selection as form parameters, one pair per id.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_tui::chooser::ChooserSelection;
    ///
    /// let selection = ChooserSelection {
    ///     product_ids: vec![1],
    ///     project_ids: vec![11, 12],
    ///     iteration_ids: vec![],
    /// };
    /// assert_eq!(
    ///     selection.to_form(),
    ///     vec![
    ///         ("productIds", "1".to_string()),
    ///         ("projectIds", "11".to_string()),
    ///         ("projectIds", "12".to_string()),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        [
            (BacklogLevel::Product, &self.product_ids),
            (BacklogLevel::Project, &self.project_ids),
            (BacklogLevel::Iteration, &self.iteration_ids),
        ]
        .into_iter()
        .flat_map(|(level, ids)| ids.iter().map(move |id| (level.parameter_name(), id.to_string())))
        .collect()
    }
}

/// The product → project → iteration chooser.
#[derive(Debug, Clone)]
pub struct BacklogChooser {
    lists: [SelectList; 3],
    recorded: [Vec<BacklogId>; 3],
    generations: [u64; 3],
    focus: BacklogLevel,
}

impl BacklogChooser {
    /// Creates a chooser that pre-selects the given backlogs once they are
    /// loaded.
    #[must_use]
    pub fn new(settings: &ChooserSettings) -> Self {
        let mut lists: [SelectList; 3] = Default::default();
        lists[BacklogLevel::Product.index()].visible = true;
        Self {
            lists,
            recorded: [
                settings.selected_products.clone(),
                settings.selected_projects.clone(),
                settings.selected_iterations.clone(),
            ],
            generations: [0; 3],
            focus: BacklogLevel::Product,
        }
    }

    /// Returns the list of a level.
    #[must_use]
    pub fn list(&self, level: BacklogLevel) -> &SelectList {
        &self.lists[level.index()]
    }

    /// Returns the focused level.
    #[must_use]
    pub fn focus(&self) -> BacklogLevel {
        self.focus
    }

    /// Moves the focus to the next visible list.
    pub fn focus_next(&mut self) {
        if let Some(child) = self.focus.child()
            && self.list(child).is_visible()
        {
            self.focus = child;
        }
    }

    /// Moves the focus to the previous list.
    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            BacklogLevel::Product | BacklogLevel::Project => BacklogLevel::Product,
            BacklogLevel::Iteration => BacklogLevel::Project,
        };
    }

    /// Moves the cursor of the focused list.
    pub fn move_cursor(&mut self, delta: isize) {
        self.lists[self.focus.index()].move_cursor(delta);
    }

    /// Toggles the option under the cursor of the focused list.
    pub fn toggle_focused(&mut self) -> Option<FetchRequest> {
        let level = self.focus;
        let index = self.list(level).cursor();
        self.toggle(level, index)
    }

    /// Resets every list and requests the products.
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> FetchRequest {
        for level in BacklogLevel::ALL {
            self.bump(level);
            self.lists[level.index()].hide();
        }
        self.lists[BacklogLevel::Product.index()].visible = true;
        self.focus = BacklogLevel::Product;
        FetchRequest::Products {
            token: self.token(BacklogLevel::Product),
        }
    }

    /// Returns `true` if a response with this token would still be applied.
    #[must_use]
    pub fn is_current(&self, token: FetchToken) -> bool {
        self.generations[token.level.index()] == token.generation
    }

    /// Fills a list from a fetch response.
    ///
    /// Responses overtaken by a newer request for the same list are dropped.
    /// Returns the follow-up request when the new contents cascade into the
    /// next level.
    #[instrument(
        skip(self, response),
        fields(level = ?response.token.level, count = response.backlogs.len())
    )]
    pub fn apply(&mut self, response: FetchResponse) -> Option<FetchRequest> {
        let token = response.token;
        if !self.is_current(token) {
            debug!(
                generation = token.generation,
                current = self.generations[token.level.index()],
                "discarding stale backlog response"
            );
            return None;
        }

        match token.level {
            BacklogLevel::Product => self.populate_products(response.backlogs),
            BacklogLevel::Project => {
                self.populate_children(BacklogLevel::Project, response.backlogs);
                self.click_project()
            }
            BacklogLevel::Iteration => {
                self.populate_children(BacklogLevel::Iteration, response.backlogs);
                None
            }
        }
    }

    /// Records the selected products and requests their projects.
    pub fn click_product(&mut self) -> Option<FetchRequest> {
        let products = self.list(BacklogLevel::Product).selected_ids();
        self.recorded[BacklogLevel::Product.index()].clone_from(&products);
        self.reset(BacklogLevel::Iteration);
        self.request_children(BacklogLevel::Project, products)
    }

    /// Records the selected projects and requests their iterations, unless
    /// "Select all" is chosen, which hides the iterations instead.
    pub fn click_project(&mut self) -> Option<FetchRequest> {
        let level = BacklogLevel::Project;
        if self.list(level).is_select_all() {
            self.lists[level.index()].deselect_concrete();
            self.recorded[level.index()].clear();
            self.reset(BacklogLevel::Iteration);
            return None;
        }
        let projects = self.list(level).selected_ids();
        self.recorded[level.index()].clone_from(&projects);
        self.request_children(BacklogLevel::Iteration, projects)
    }

    /// Records the selected iterations; "Select all" clears the others.
    pub fn click_iteration(&mut self) {
        let level = BacklogLevel::Iteration;
        if self.list(level).is_select_all() {
            self.lists[level.index()].deselect_concrete();
        }
        self.recorded[level.index()] = self.list(level).selected_ids();
    }

    /// Toggles an option as the user would, then runs the level's click
    /// handler.
    ///
    /// "Select all" and concrete options exclude each other. Placeholder and
    /// "No backlogs found" options cannot be selected.
    pub fn toggle(&mut self, level: BacklogLevel, index: usize) -> Option<FetchRequest> {
        let list = &mut self.lists[level.index()];
        let choice = list.options.get(index)?.choice;
        if !choice.is_selectable() {
            return None;
        }

        let option = &mut list.options[index];
        option.selected = !option.selected;
        let now_selected = option.selected;
        if now_selected {
            match choice {
                Choice::SelectAll => list.deselect_concrete(),
                _ => {
                    for option in &mut list.options {
                        if option.choice == Choice::SelectAll {
                            option.selected = false;
                        }
                    }
                }
            }
        }

        match level {
            BacklogLevel::Product => self.click_product(),
            BacklogLevel::Project => self.click_project(),
            BacklogLevel::Iteration => {
                self.click_iteration();
                None
            }
        }
    }

    /// Returns the real backlogs selected at every level.
    #[must_use]
    pub fn selection(&self) -> ChooserSelection {
        ChooserSelection {
            product_ids: self.list(BacklogLevel::Product).selected_ids(),
            project_ids: self.list(BacklogLevel::Project).selected_ids(),
            iteration_ids: self.list(BacklogLevel::Iteration).selected_ids(),
        }
    }

    fn populate_products(&mut self, products: Vec<BacklogSummary>) -> Option<FetchRequest> {
        let list = &mut self.lists[BacklogLevel::Product.index()];
        if products.is_empty() {
            list.show(vec![SelectOption::new(Choice::Placeholder, NO_PRODUCTS_LABEL, false)]);
            return None;
        }

        let preselected = &self.recorded[BacklogLevel::Product.index()];
        let options: Vec<_> = products
            .into_iter()
            .map(|product| {
                let selected = preselected.contains(&product.id);
                SelectOption::new(Choice::Backlog(product.id), product.name, selected)
            })
            .collect();
        let cascade = options.iter().any(|option| option.selected);
        list.show(options);

        if cascade { self.click_product() } else { None }
    }

    fn populate_children(&mut self, level: BacklogLevel, children: Vec<BacklogSummary>) {
        let list = &mut self.lists[level.index()];
        if children.is_empty() {
            list.show(vec![SelectOption::new(Choice::NoneFound, NO_BACKLOGS_LABEL, false)]);
            return;
        }

        let preselected = &self.recorded[level.index()];
        let mut seen = HashSet::new();
        let mut options = vec![SelectOption::new(Choice::SelectAll, SELECT_ALL_LABEL, false)];
        options.extend(children.into_iter().filter(|child| seen.insert(child.id)).map(|child| {
            let selected = preselected.contains(&child.id);
            SelectOption::new(Choice::Backlog(child.id), child.name, selected)
        }));
        if !options.iter().any(|option| option.selected) {
            options[0].selected = true;
        }
        list.show(options);
    }

    fn request_children(
        &mut self,
        level: BacklogLevel,
        parents: Vec<BacklogId>,
    ) -> Option<FetchRequest> {
        self.reset(level);
        if parents.is_empty() {
            return None;
        }
        Some(FetchRequest::SubBacklogs {
            token: self.token(level),
            parents,
        })
    }

    /// Empties and hides a list, invalidating requests in flight for it.
    fn reset(&mut self, level: BacklogLevel) {
        self.bump(level);
        self.lists[level.index()].hide();
        if self.focus.index() >= level.index() {
            self.focus = match level {
                BacklogLevel::Iteration => BacklogLevel::Project,
                BacklogLevel::Product | BacklogLevel::Project => BacklogLevel::Product,
            };
        }
    }

    fn bump(&mut self, level: BacklogLevel) {
        self.generations[level.index()] += 1;
    }

    fn token(&self, level: BacklogLevel) -> FetchToken {
        FetchToken {
            level,
            generation: self.generations[level.index()],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sprintboard_protocol::dummy::{dummy_products, dummy_sub_backlogs};

    use super::*;

    /// Answers requests from the demo hierarchy.
    fn respond(request: &FetchRequest) -> FetchResponse {
        let children: HashMap<_, _> = dummy_sub_backlogs().into_iter().collect();
        let backlogs = match request {
            FetchRequest::Products { .. } => dummy_products(),
            FetchRequest::SubBacklogs { parents, .. } => parents
                .iter()
                .flat_map(|parent| children.get(parent).cloned().unwrap_or_default())
                .collect(),
        };
        FetchResponse::new(request, backlogs)
    }

    /// Applies responses until the cascade settles.
    fn settle(chooser: &mut BacklogChooser, request: FetchRequest) {
        let mut next = Some(request);
        while let Some(request) = next {
            next = chooser.apply(respond(&request));
        }
    }

    fn labels(chooser: &BacklogChooser, level: BacklogLevel) -> Vec<&str> {
        chooser
            .list(level)
            .options()
            .iter()
            .map(|option| option.label.as_str())
            .collect()
    }

    fn settings(products: &[BacklogId], projects: &[BacklogId]) -> ChooserSettings {
        ChooserSettings {
            selected_products: products.to_vec(),
            selected_projects: projects.to_vec(),
            selected_iterations: Vec::new(),
        }
    }

    #[test]
    fn products_without_preselection_do_not_cascade() {
        let mut chooser = BacklogChooser::new(&ChooserSettings::default());
        let request = chooser.initialize();
        assert!(chooser.apply(respond(&request)).is_none());

        assert_eq!(
            labels(&chooser, BacklogLevel::Product),
            ["Tracker Web", "Tracker Mobile", "Internal Tools"]
        );
        assert!(!chooser.list(BacklogLevel::Project).is_visible());
    }

    #[test]
    fn preselected_products_cascade_into_projects_and_iterations() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[11]));
        let request = chooser.initialize();

        let projects = chooser.apply(respond(&request)).unwrap();
        assert!(matches!(
            &projects,
            FetchRequest::SubBacklogs { token, parents }
                if token.level == BacklogLevel::Project && parents == &[1]
        ));

        let iterations = chooser.apply(respond(&projects)).unwrap();
        assert_eq!(
            labels(&chooser, BacklogLevel::Project),
            ["Select all", "Web 2.0 Redesign", "Accessibility Audit"]
        );
        assert!(!chooser.list(BacklogLevel::Project).is_select_all());
        assert!(matches!(
            &iterations,
            FetchRequest::SubBacklogs { parents, .. } if parents == &[11]
        ));

        assert!(chooser.apply(respond(&iterations)).is_none());
        assert!(chooser.list(BacklogLevel::Iteration).is_visible());
        assert!(chooser.list(BacklogLevel::Iteration).is_select_all());

        assert_eq!(
            chooser.selection(),
            ChooserSelection {
                product_ids: vec![1],
                project_ids: vec![11],
                iteration_ids: vec![],
            }
        );
    }

    #[test]
    fn empty_product_list_shows_placeholder() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[]));
        let request = chooser.initialize();
        assert!(chooser.apply(FetchResponse::new(&request, Vec::new())).is_none());

        assert_eq!(labels(&chooser, BacklogLevel::Product), [NO_PRODUCTS_LABEL]);
        assert_eq!(chooser.list(BacklogLevel::Product).options()[0].choice.value(), None);
        assert!(chooser.toggle(BacklogLevel::Product, 0).is_none());
        assert!(!chooser.list(BacklogLevel::Product).options()[0].selected);
    }

    #[test]
    fn select_all_projects_clears_others_and_hides_iterations() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[11]));
        let request = chooser.initialize();
        settle(&mut chooser, request);
        assert!(chooser.list(BacklogLevel::Iteration).is_visible());

        assert!(chooser.toggle(BacklogLevel::Project, 0).is_none());

        let projects = chooser.list(BacklogLevel::Project);
        assert!(projects.is_select_all());
        assert!(projects.selected_ids().is_empty());
        assert!(!chooser.list(BacklogLevel::Iteration).is_visible());
        assert!(chooser.list(BacklogLevel::Iteration).options().is_empty());
    }

    #[test]
    fn concrete_option_deselects_select_all() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[]));
        let request = chooser.initialize();
        settle(&mut chooser, request);
        assert!(chooser.list(BacklogLevel::Project).is_select_all());

        let iterations = chooser.toggle(BacklogLevel::Project, 1).unwrap();
        assert!(!chooser.list(BacklogLevel::Project).is_select_all());
        assert_eq!(chooser.list(BacklogLevel::Project).selected_ids(), [11]);

        chooser.apply(respond(&iterations));
        assert_eq!(
            labels(&chooser, BacklogLevel::Iteration),
            ["Select all", "Sprint 14", "Sprint 15"]
        );
    }

    #[test]
    fn project_without_children_shows_none_found() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[12]));
        let request = chooser.initialize();
        settle(&mut chooser, request);

        let iterations = chooser.list(BacklogLevel::Iteration);
        assert!(iterations.is_visible());
        assert_eq!(labels(&chooser, BacklogLevel::Iteration), [NO_BACKLOGS_LABEL]);
        assert_eq!(iterations.options()[0].choice.value(), Some(-2));
        assert!(chooser.toggle(BacklogLevel::Iteration, 0).is_none());
        assert!(chooser.selection().iteration_ids.is_empty());
    }

    #[test]
    fn deselecting_every_product_hides_projects() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[]));
        let request = chooser.initialize();
        settle(&mut chooser, request);
        assert!(chooser.list(BacklogLevel::Project).is_visible());

        assert!(chooser.toggle(BacklogLevel::Product, 0).is_none());
        assert!(!chooser.list(BacklogLevel::Project).is_visible());
        assert!(!chooser.list(BacklogLevel::Iteration).is_visible());
    }

    #[test]
    fn children_of_several_parents_are_merged() {
        let mut chooser = BacklogChooser::new(&settings(&[1, 2], &[]));
        let request = chooser.initialize();
        let projects = chooser.apply(respond(&request)).unwrap();

        let mut response = respond(&projects);
        response.backlogs.push(BacklogSummary::new(11, "Web 2.0 Redesign"));
        chooser.apply(response);

        assert_eq!(
            labels(&chooser, BacklogLevel::Project),
            ["Select all", "Web 2.0 Redesign", "Accessibility Audit", "Offline Mode"]
        );
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut chooser = BacklogChooser::new(&settings(&[1], &[]));
        let first = chooser.initialize();
        let second = chooser.initialize();
        assert!(!chooser.is_current(first.token()));

        assert!(chooser.apply(respond(&first)).is_none());
        assert!(chooser.list(BacklogLevel::Product).options().is_empty());

        let projects = chooser.apply(respond(&second)).unwrap();
        // The user changes the products before the projects arrive.
        chooser.toggle(BacklogLevel::Product, 1);
        assert!(chooser.apply(respond(&projects)).is_none());
        assert_eq!(chooser.list(BacklogLevel::Project).options().len(), 0);
    }

    #[test]
    fn focus_only_enters_visible_lists() {
        let mut chooser = BacklogChooser::new(&ChooserSettings::default());
        let request = chooser.initialize();
        settle(&mut chooser, request);

        chooser.focus_next();
        assert_eq!(chooser.focus(), BacklogLevel::Product);

        chooser.move_cursor(1);
        let projects = chooser.toggle_focused().unwrap();
        assert_eq!(chooser.selection().product_ids, [2]);
        chooser.apply(respond(&projects));

        chooser.focus_next();
        assert_eq!(chooser.focus(), BacklogLevel::Project);
        chooser.focus_previous();
        assert_eq!(chooser.focus(), BacklogLevel::Product);
    }
}
