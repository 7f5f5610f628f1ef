use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

/// Modules selectable from the dashboard. Only Chat is implemented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Module {
    #[default]
    Chat,
    Email,
    Sms,
    VoiceCall,
}

impl Module {
    pub const ALL: [Module; 4] = [Module::Chat, Module::Email, Module::Sms, Module::VoiceCall];

    pub fn label(self) -> &'static str {
        match self {
            Module::Chat => "Chat",
            Module::Email => "Email",
            Module::Sms => "SMS",
            Module::VoiceCall => "Voice Call",
        }
    }

    /// Text shown in place of an unimplemented module
    pub fn placeholder(self) -> Option<String> {
        match self {
            Module::Chat => None,
            other => Some(format!("{} Module (Coming Soon)", other.label())),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Module {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(Module::Chat),
            "email" => Ok(Module::Email),
            "sms" => Ok(Module::Sms),
            "voice" | "voice call" | "voicecall" => Ok(Module::VoiceCall),
            other => Err(anyhow!("Unknown module '{}'", other)),
        }
    }
}

/// A change of active module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch {
    pub from: Module,
    pub to: Module,
}

impl Switch {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}

/// Dashboard shell state
#[derive(Debug, Default)]
pub struct Dashboard {
    active: Module,
}

impl Dashboard {
    pub fn active(&self) -> Module {
        self.active
    }

    pub fn activate(&mut self, module: Module) -> Switch {
        let from = std::mem::replace(&mut self.active, module);
        Switch { from, to: module }
    }

    pub fn reset(&mut self) {
        self.active = Module::default();
    }

    /// Module bar, active module in brackets
    pub fn render_bar(&self) -> String {
        Module::ALL
            .iter()
            .map(|m| {
                if *m == self.active {
                    format!("[{}]", m.label())
                } else {
                    m.label().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
