use dialchat_types::Identity;

/// Sign-in screen state: the identity options and the current selection
pub struct SignIn {
    options: Vec<Identity>,
    selected: Option<usize>,
}

impl SignIn {
    pub fn new(options: Vec<Identity>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    /// Select by 1-based position or by exact number. Returns false if nothing matched.
    pub fn select(&mut self, choice: &str) -> bool {
        let choice = choice.trim();
        let index = match choice.parse::<usize>() {
            Ok(n) if (1..=self.options.len()).contains(&n) => Some(n - 1),
            _ => self.options.iter().position(|o| o.number == choice),
        };
        if index.is_some() {
            self.selected = index;
        }
        index.is_some()
    }

    pub fn selected(&self) -> Option<&Identity> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// The chosen identity; `None` while nothing is selected
    pub fn submit(&self) -> Option<Identity> {
        self.selected().cloned()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Select a number to sign in:\n");
        for (i, option) in self.options.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, option.display_name()));
        }
        out.push_str("Enter a choice (1, 2, ...) or a listed number:");
        out
    }
}

/// The signed-in identity, held only in memory
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Identity>,
}

impl Session {
    pub fn sign_in(&mut self, identity: Identity) {
        self.current = Some(identity);
    }

    pub fn sign_out(&mut self) -> Option<Identity> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Sender id for outgoing messages; empty when signed out
    pub fn sender_id(&self) -> &str {
        self.current.as_ref().map_or("", |i| i.number.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<Identity> {
        vec![
            Identity::new("Test Number 1", "+13613392529").unwrap(),
            Identity::new("Test Number 2", "+13613227495").unwrap(),
        ]
    }

    #[test]
    fn test_submit_requires_selection() {
        let sign_in = SignIn::new(options());
        assert!(sign_in.submit().is_none());
    }

    #[test]
    fn test_select_by_index_and_number() {
        let mut sign_in = SignIn::new(options());
        assert!(sign_in.select("2"));
        assert_eq!(sign_in.submit().unwrap().number, "+13613227495");

        assert!(sign_in.select(" +13613392529 "));
        assert_eq!(sign_in.submit().unwrap().label, "Test Number 1");
    }

    #[test]
    fn test_invalid_choice_keeps_previous_selection() {
        let mut sign_in = SignIn::new(options());
        assert!(sign_in.select("1"));
        assert!(!sign_in.select("3"));
        assert!(!sign_in.select("0"));
        assert!(!sign_in.select(""));
        assert!(!sign_in.select("+19999999999"));
        assert_eq!(sign_in.selected().unwrap().number, "+13613392529");

        sign_in.clear();
        assert!(sign_in.submit().is_none());
    }

    #[test]
    fn test_render_lists_options() {
        let rendered = SignIn::new(options()).render();
        assert!(rendered.contains("1. Test Number 1 (+13613392529)"));
        assert!(rendered.contains("2. Test Number 2 (+13613227495)"));
    }

    #[test]
    fn test_session_sign_in_and_out() {
        let mut session = Session::default();
        assert_eq!(session.sender_id(), "");

        session.sign_in(options().remove(0));
        assert_eq!(session.sender_id(), "+13613392529");

        let previous = session.sign_out().unwrap();
        assert_eq!(previous.number, "+13613392529");
        assert!(session.current().is_none());
        assert_eq!(session.sender_id(), "");
    }
}
