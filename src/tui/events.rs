/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Session
    LoggedIn,
    Logout,

    // Navigation
    Navigate(Page),
    TabNext,
    TabPrev,
    ToggleSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which page the shell shows once logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    Dashboard,
    #[default]
    Subscriptions,
    PaymentDetails,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 3] = [Page::Subscriptions, Page::Dashboard, Page::PaymentDetails];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Subscriptions => "Admin",
            Page::PaymentDetails => "Payment Details",
        }
    }

    /// Page heading, distinct from the shorter sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Subscriptions => "Subscription Management",
            Page::PaymentDetails => "Payment Details",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Dashboard => "◧",
            Page::Subscriptions => "☰",
            Page::PaymentDetails => "$",
        }
    }

    pub fn next(self) -> Page {
        let idx = Page::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Page::ALL[(idx + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Page {
        let idx = Page::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Page::ALL[(idx + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Whether sidebar or main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFocus {
    Sidebar,
    Main,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
