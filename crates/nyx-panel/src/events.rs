//! User actions and the listeners that receive them.
//!
//! A tab subscribes to the controls it reacts to through a
//! [`SubscriptionScope`]. Finishing the scope yields a [`Disposer`] that
//! remembers exactly those listeners, so tearing a tab down removes what it
//! attached and nothing else.

/// A divination or panel behavior that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// The crystal ball tab.
    Crystal,
    /// The tarot tab.
    Tarot,
    /// The ouija tab.
    Ouija,
    /// Sending results into the host conversation.
    Injection,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Crystal => write!(f, "Crystal Ball"),
            Self::Tarot => write!(f, "Tarot"),
            Self::Ouija => write!(f, "Ouija"),
            Self::Injection => write!(f, "Chat Injection"),
        }
    }
}

/// A control a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// The tarot draw button.
    DrawCard,
    /// The crystal ball gaze button.
    Gaze,
    /// The ouija question form.
    Consult,
    /// The theme picker.
    SelectTheme,
    /// A feature switch.
    ToggleFeature,
    /// The reversal chance slider.
    SetReversalChance,
    /// A tab's "clear history" button.
    ClearHistory,
}

/// A user action, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Draw a tarot card.
    DrawCard,
    /// Gaze into the crystal ball.
    Gaze,
    /// Ask the ouija board a question.
    Consult(String),
    /// Pick a theme by id.
    SelectTheme(String),
    /// Flip a feature switch.
    ToggleFeature(Feature),
    /// Set the tarot reversal chance in percent.
    SetReversalChance(u8),
    /// Clear the active tab's history.
    ClearHistory,
}

impl PanelEvent {
    /// The control this event comes from.
    pub fn control(&self) -> Control {
        match self {
            Self::DrawCard => Control::DrawCard,
            Self::Gaze => Control::Gaze,
            Self::Consult(_) => Control::Consult,
            Self::SelectTheme(_) => Control::SelectTheme,
            Self::ToggleFeature(_) => Control::ToggleFeature,
            Self::SetReversalChance(_) => Control::SetReversalChance,
            Self::ClearHistory => Control::ClearHistory,
        }
    }
}

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    tab: String,
    control: Control,
}

/// Registry of listeners, keyed by control.
#[derive(Debug, Default)]
pub struct EventRouter {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventRouter {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope that registers listeners on behalf of `tab`.
    pub fn scope(&mut self, tab: &str) -> SubscriptionScope<'_> {
        SubscriptionScope {
            router: self,
            tab: tab.to_string(),
            ids: Vec::new(),
        }
    }

    /// The owning tab of every listener on `control`, one per listener.
    ///
    /// A tab that attached the same control twice appears twice.
    pub fn listeners_for(&self, control: Control) -> Vec<String> {
        self.listeners
            .iter()
            .filter(|l| l.control == control)
            .map(|l| l.tab.clone())
            .collect()
    }

    /// Total number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners registered by `tab`.
    pub fn listeners_of(&self, tab: &str) -> usize {
        self.listeners.iter().filter(|l| l.tab == tab).count()
    }

    fn add(&mut self, tab: &str, control: Control) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            tab: tab.to_string(),
            control,
        });
        id
    }

    fn remove(&mut self, ids: &[ListenerId]) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| !ids.contains(&l.id));
        before - self.listeners.len()
    }
}

/// Collects the listeners one tab attaches.
#[derive(Debug)]
pub struct SubscriptionScope<'a> {
    router: &'a mut EventRouter,
    tab: String,
    ids: Vec<ListenerId>,
}

impl SubscriptionScope<'_> {
    /// Listen to `control`.
    pub fn listen(&mut self, control: Control) -> ListenerId {
        let id = self.router.add(&self.tab, control);
        self.ids.push(id);
        id
    }

    /// Close the scope, returning the handle that removes its listeners.
    pub fn finish(self) -> Disposer {
        Disposer { ids: self.ids }
    }
}

/// Removes the listeners of one finished scope.
#[derive(Debug, Default)]
#[must_use = "dropping a disposer leaks its listeners"]
pub struct Disposer {
    ids: Vec<ListenerId>,
}

impl Disposer {
    /// Remove every listener this scope attached. Returns how many were removed.
    pub fn dispose(self, router: &mut EventRouter) -> usize {
        router.remove(&self.ids)
    }

    /// Number of listeners held.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the scope attached nothing.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_registers_and_disposer_removes() {
        let mut router = EventRouter::new();
        let mut scope = router.scope("tarot");
        scope.listen(Control::DrawCard);
        scope.listen(Control::ClearHistory);
        let disposer = scope.finish();
        assert_eq!(disposer.len(), 2);
        assert_eq!(router.listener_count(), 2);
        assert_eq!(router.listeners_for(Control::DrawCard), vec!["tarot"]);

        assert_eq!(disposer.dispose(&mut router), 2);
        assert_eq!(router.listener_count(), 0);
    }

    #[test]
    fn disposing_one_scope_leaves_others() {
        let mut router = EventRouter::new();
        let mut a = router.scope("a");
        a.listen(Control::Gaze);
        let a = a.finish();
        let mut b = router.scope("b");
        b.listen(Control::Gaze);
        let b = b.finish();

        assert_eq!(a.dispose(&mut router), 1);
        assert_eq!(router.listeners_for(Control::Gaze), vec!["b"]);
        assert_eq!(b.dispose(&mut router), 1);
    }

    #[test]
    fn duplicate_listeners_fire_twice() {
        let mut router = EventRouter::new();
        let mut scope = router.scope("x");
        scope.listen(Control::Gaze);
        scope.listen(Control::Gaze);
        let disposer = scope.finish();
        assert_eq!(router.listeners_for(Control::Gaze).len(), 2);
        assert_eq!(router.listeners_of("x"), 2);
        let _ = disposer.dispose(&mut router);
    }

    #[test]
    fn event_controls() {
        assert_eq!(PanelEvent::Consult("q".into()).control(), Control::Consult);
        assert_eq!(
            PanelEvent::ToggleFeature(Feature::Ouija).control(),
            Control::ToggleFeature
        );
        assert_eq!(PanelEvent::Gaze.control(), Control::Gaze);
    }

    #[test]
    fn feature_display() {
        assert_eq!(Feature::Crystal.to_string(), "Crystal Ball");
        assert_eq!(Feature::Injection.to_string(), "Chat Injection");
    }
}
