use crate::chat::ChatPanel;
use crate::config::Config;
use crate::dashboard::{Dashboard, Module};
use crate::render::MessageView;
use crate::session::{Session, SignIn};
use anyhow::Result;
use dialchat_api::{HttpTransport, MessageTransport};
use dialchat_sync::SyncEvent;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

const HELP: &str = "Commands: /module <chat|email|sms|voice>, /attach <path>, /retry, /signout, /quit";

/// What woke the main loop
enum Step {
    Line(String),
    Chat(SyncEvent),
    Quit,
}

/// A parsed dashboard input line
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Text(&'a str),
    Attach(&'a str),
    Module(&'a str),
    Retry,
    SignOut,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let Some(command) = line.trim_start().strip_prefix('/') else {
        return Input::Text(line);
    };
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));
    match name {
        "attach" => Input::Attach(arg),
        "module" => Input::Module(arg),
        "retry" => Input::Retry,
        "signout" => Input::SignOut,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other),
    }
}

/// Application service - owns the session, dashboard and chat panel
pub struct AppService {
    config: Config,
    transport: Arc<dyn MessageTransport>,
    sign_in: SignIn,
    session: Session,
    dashboard: Dashboard,
    chat: Option<ChatPanel>,
}

impl AppService {
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn MessageTransport>) -> Self {
        let sign_in = SignIn::new(config.identities.clone());
        Self {
            config,
            transport,
            sign_in,
            session: Session::default(),
            dashboard: Dashboard::default(),
            chat: None,
        }
    }

    /// Run until /quit, end of input, or Ctrl+C
    pub async fn run(mut self) -> Result<()> {
        info!("Starting dialchat against {}", self.config.api.base());

        let mut lines = LinesStream::new(BufReader::new(io::stdin()).lines());
        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        println!("{}", self.sign_in.render());

        loop {
            let step = tokio::select! {
                line = lines.next() => match line {
                    Some(Ok(line)) => Step::Line(line),
                    Some(Err(e)) => {
                        error!("Failed to read input: {}", e);
                        Step::Quit
                    }
                    None => Step::Quit,
                },
                Some(event) = next_chat_event(&mut self.chat) => Step::Chat(event),
                result = &mut ctrl_c => {
                    if let Err(e) = result {
                        error!("Failed to install Ctrl+C handler: {}", e);
                    }
                    info!("Received shutdown signal");
                    Step::Quit
                }
            };

            match step {
                Step::Line(line) => {
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Step::Chat(event) => {
                    if let Some(chat) = &self.chat {
                        chat.handle_event(event);
                    }
                }
                Step::Quit => break,
            }
        }

        self.close_chat().await;
        info!("dialchat stopped");
        Ok(())
    }

    /// Returns false when the app should exit
    async fn handle_line(&mut self, line: &str) -> bool {
        if self.session.current().is_none() {
            self.handle_sign_in(line);
            return true;
        }

        match parse_input(line) {
            Input::Text(text) => match &mut self.chat {
                Some(chat) => chat.send_text(text).await,
                None => println!("Switch to Chat to send messages. {HELP}"),
            },
            Input::Attach(path) => match &self.chat {
                Some(chat) => chat.attach(path).await,
                None => println!("Switch to Chat to send attachments."),
            },
            Input::Retry => {
                if let Some(chat) = &mut self.chat {
                    chat.send_draft().await;
                }
            }
            Input::Module(name) => match name.parse::<Module>() {
                Ok(module) => self.switch_module(module).await,
                Err(e) => println!("{e}. {HELP}"),
            },
            Input::SignOut => self.sign_out().await,
            Input::Help => println!("{HELP}"),
            Input::Quit => return false,
            Input::Unknown(name) => println!("Unknown command /{name}. {HELP}"),
        }
        true
    }

    fn handle_sign_in(&mut self, line: &str) {
        if !self.sign_in.select(line) {
            println!("'{}' is not one of the listed numbers.", line.trim());
            println!("{}", self.sign_in.render());
            return;
        }
        let Some(identity) = self.sign_in.submit() else {
            return;
        };

        info!("Signed in with: {}", identity.number);
        println!("Signed in as {}", identity.display_name());
        self.session.sign_in(identity);
        self.dashboard.reset();
        println!("{}\n{HELP}", self.dashboard.render_bar());
        self.enter_module(self.dashboard.active());
    }

    async fn switch_module(&mut self, module: Module) {
        let switch = self.dashboard.activate(module);
        if !switch.is_change() {
            return;
        }
        if switch.from == Module::Chat {
            self.close_chat().await;
        }
        println!("{}", self.dashboard.render_bar());
        self.enter_module(switch.to);
    }

    fn enter_module(&mut self, module: Module) {
        match module.placeholder() {
            Some(placeholder) => println!("{placeholder}"),
            None => self.open_chat(),
        }
    }

    fn open_chat(&mut self) {
        if self.chat.is_some() {
            warn!("Chat panel already open");
            return;
        }
        let view = MessageView::new(self.config.api.clone(), self.config.view.clone());
        self.chat = Some(ChatPanel::open(
            Arc::clone(&self.transport),
            self.config.sync.clone(),
            view,
            self.session.sender_id(),
        ));
    }

    async fn close_chat(&mut self) {
        if let Some(chat) = self.chat.take() {
            chat.close().await;
        }
    }

    async fn sign_out(&mut self) {
        self.close_chat().await;
        if let Some(identity) = self.session.sign_out() {
            info!("Signed out: {}", identity.number);
        }
        self.sign_in.clear();
        self.dashboard.reset();
        println!("{}", self.sign_in.render());
    }
}

/// Next event from the open chat panel; pending forever when none is open
async fn next_chat_event(chat: &mut Option<ChatPanel>) -> Option<SyncEvent> {
    match chat {
        Some(chat) => chat.next_event().await,
        None => std::future::pending().await,
    }
}
