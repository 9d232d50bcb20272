use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use vault_client::api::client::DEFAULT_SCORE_LIMIT;
use vault_client::api::ApiClient;
use vault_client::config::{AppConfig, BASE_URL_VAR};
use vault_client::engagement::{ActionChecklist, EngagementEvent, EngagementScore};
use vault_client::errors::SubmitRejected;
use vault_client::exercise::{
    drive_breathing, BreathingExercise, ExerciseOutcome, ExerciseStatus, GroundingExercise,
};
use vault_client::models::{ActionPlan, ChatMessage, InterventionType};
use vault_client::service::{ChatController, DataSource, InsightsService, Loaded, SubmitOutcome};
use vault_client::ui::{chat, exercise, pages};
use vault_client::wellbeing::format_score;

type StdinLines = Lines<BufReader<Stdin>>;

/// Terminal front end: owns the controller and the view-local state.
struct App {
    client: ApiClient,
    chat: ChatController<ApiClient>,
    insights: InsightsService<ApiClient>,
    engagement: EngagementScore,
    checklist: ActionChecklist,
    /// Plans from the last `/plans`, so `/done` can address them by number.
    plans: Vec<ActionPlan>,
    lines: StdinLines,
}

impl App {
    fn new(client: ApiClient) -> Self {
        Self {
            chat: ChatController::new(client.clone()),
            insights: InsightsService::new(client.clone()),
            client,
            engagement: EngagementScore::starting(),
            checklist: ActionChecklist::default(),
            plans: Vec::new(),
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        println!("{}\n\n{}\n", chat::render_welcome(), pages::HELP);
        loop {
            prompt()?;
            let Some(line) = self.lines.next_line().await.context("reading stdin")? else {
                return Ok(());
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(command) = line.strip_prefix('/') {
                if !self.command(command).await? {
                    return Ok(());
                }
            } else {
                self.send(line).await?;
            }
        }
    }

    /// Handles a slash command; returns `false` when the user quits.
    async fn command(&mut self, command: &str) -> anyhow::Result<bool> {
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "quit" | "exit" => return Ok(false),
            "help" => println!("{}", pages::HELP),
            "new" => {
                self.chat.start_new_session();
                println!("{}", chat::render_welcome());
            }
            "transcript" => println!("{}", chat::render_transcript(&self.chat.snapshot())),
            "end" => self.end_session().await,
            "history" => {
                let history = self.insights.load_history().await;
                println!("{}", pages::render_history(&history));
            }
            "session" => match arg.and_then(|a| a.parse::<i64>().ok()) {
                Some(id) => match self.client.session(id).await {
                    Ok(detail) => println!("{}", pages::render_session_detail(&detail)),
                    Err(e) => println!("Could not load session #{id}: {e}"),
                },
                None => println!("Usage: /session <id>"),
            },
            "dashboard" => {
                let days = arg.and_then(|a| a.parse::<u32>().ok());
                let trend = self.insights.load_trend(days).await;
                println!("{}", pages::render_dashboard(&trend, &self.engagement));
            }
            "scores" => match self.client.score_history(DEFAULT_SCORE_LIMIT).await {
                Ok(points) if !points.is_empty() => {
                    for point in points {
                        println!("  {:<12} {}", point.date, format_score(Some(point.score)));
                    }
                }
                Ok(_) => println!("No scores recorded yet."),
                Err(e) => println!("Could not load score history: {e}"),
            },
            "plans" => {
                let plans = self.insights.load_action_plans().await;
                println!("{}", pages::render_action_plans(&plans, &self.checklist));
                self.plans = plans.data;
            }
            "plan" => self.generate_plan().await,
            "done" => self.toggle_action(arg),
            "breathe" => self.run_exercise(InterventionType::Breathing).await?,
            "ground" => self.run_exercise(InterventionType::Grounding).await?,
            "health" => match self.client.health().await {
                Ok(health) => println!("Backend status: {}", health.status),
                Err(e) => println!("Backend unreachable: {e}"),
            },
            other => match other.parse::<usize>().ok().and_then(chat::quick_start) {
                Some(prompt) if self.chat.messages().is_empty() => {
                    println!("{}", chat::render_message(&ChatMessage::user(prompt)));
                    self.send(prompt).await?;
                }
                Some(_) => println!("Quick starts are offered in a new conversation. Type /new first."),
                None => println!("Unknown command /{other}. Type /help for a list."),
            },
        }
        Ok(true)
    }

    async fn send(&mut self, content: &str) -> anyhow::Result<()> {
        println!("{}", chat::TYPING);
        match self.chat.submit(content).await {
            Ok(SubmitOutcome::Replied { reply, intervention }) => {
                self.engagement.record(EngagementEvent::MessageExchanged);
                println!("{}", chat::render_message(&reply));
                println!("{}", chat::render_header(&self.chat.snapshot(), &self.engagement));
                if let Some(kind) = intervention {
                    self.run_exercise(kind).await?;
                }
            }
            Ok(SubmitOutcome::Failed { notice }) => println!("{}", chat::render_message(&notice)),
            Ok(SubmitOutcome::Discarded) => {}
            Err(SubmitRejected::Blank) => {}
            Err(SubmitRejected::AwaitingReply) => println!("Still waiting for Vault to reply…"),
        }
        Ok(())
    }

    async fn end_session(&mut self) {
        let Some(id) = self.chat.session_id() else {
            println!("No active session to end.");
            return;
        };
        match self.client.end_session(id).await {
            Ok(ended) => {
                info!("Ended session {id}");
                if let Some(summary) = ended.session.session_summary {
                    println!("Session summary: {summary}");
                }
                self.chat.start_new_session();
                println!("Session #{id} ended. Say hello to start a new one.");
            }
            Err(e) => println!("Could not end session #{id}: {e}"),
        }
    }

    async fn generate_plan(&mut self) {
        let Some(id) = self.chat.session_id() else {
            println!("Chat first, then ask for an action plan.");
            return;
        };
        match self.client.generate_action_plan(id).await {
            Ok(plan) => {
                let loaded = Loaded {
                    data: vec![plan],
                    source: DataSource::Live,
                };
                println!("{}", pages::render_action_plans(&loaded, &self.checklist));
                self.plans = loaded.data;
            }
            Err(e) => println!("Could not generate an action plan: {e}"),
        }
    }

    fn toggle_action(&mut self, arg: Option<&str>) {
        let parsed = arg.and_then(|a| a.split_once('.')).and_then(|(p, i)| {
            Some((p.parse::<usize>().ok()?, i.parse::<usize>().ok()?))
        });
        let Some((plan_no, item_no)) = parsed else {
            println!("Usage: /done <plan>.<item>, e.g. /done 1.2 (run /plans first)");
            return;
        };
        let Some(plan) = plan_no.checked_sub(1).and_then(|i| self.plans.get(i)) else {
            println!("No plan #{plan_no}. Run /plans to list them.");
            return;
        };
        let Some(action) = item_no.checked_sub(1).and_then(|i| plan.actions.get(i)) else {
            println!("Plan #{plan_no} has no item {item_no}.");
            return;
        };
        let checked = self
            .checklist
            .toggle(plan.session_id, item_no - 1, &mut self.engagement);
        let mark = if checked { "Done" } else { "Unchecked" };
        println!(
            "{mark}: {} (engagement {}/100)",
            action.title,
            self.engagement.value()
        );
    }

    async fn run_exercise(&mut self, kind: InterventionType) -> anyhow::Result<()> {
        let chat = self.chat.clone();
        let on_complete = move |_: ExerciseOutcome| chat.clear_intervention();

        let status = match kind {
            InterventionType::Breathing => self.breathe(on_complete).await?,
            InterventionType::Grounding => self.ground(on_complete).await?,
        };
        match status {
            ExerciseStatus::Ended(ExerciseOutcome::Finished) => {
                println!("Well done. Take that calm with you.")
            }
            ExerciseStatus::Ended(ExerciseOutcome::Dismissed) => println!("Exercise closed."),
            ExerciseStatus::Active => {}
        }
        Ok(())
    }

    async fn breathe(
        &mut self,
        on_complete: impl FnOnce(ExerciseOutcome) + Send + 'static,
    ) -> anyhow::Result<ExerciseStatus> {
        println!("{}", exercise::BREATHING_TITLE);
        let (mut breathing, first) = BreathingExercise::start(on_complete);
        let cancel = CancellationToken::new();

        {
            let drive = drive_breathing(&mut breathing, first, &cancel, |ex| {
                println!("{}", exercise::breathing_frame(ex));
            });
            tokio::pin!(drive);

            // Any input line closes the exercise.
            tokio::select! {
                _ = &mut drive => {}
                line = self.lines.next_line() => {
                    line.context("reading stdin")?;
                    cancel.cancel();
                    drive.await;
                }
            }
        }
        Ok(breathing.status())
    }

    async fn ground(
        &mut self,
        on_complete: impl FnOnce(ExerciseOutcome) + Send + 'static,
    ) -> anyhow::Result<ExerciseStatus> {
        println!("{}", exercise::GROUNDING_TITLE);
        let mut grounding = GroundingExercise::start(on_complete);

        while grounding.is_active() {
            println!("{}", exercise::grounding_frame(&grounding));
            prompt()?;
            match self.lines.next_line().await.context("reading stdin")? {
                Some(input) if matches!(input.trim(), "q" | "quit" | "close") => grounding.dismiss(),
                Some(_) => grounding.advance(),
                None => grounding.dismiss(),
            }
        }
        Ok(grounding.status())
    }
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env()?;
    if !config.has_base_url() {
        warn!("{BASE_URL_VAR} is not set; requests use relative paths and will fail");
    }

    // ── Backend client ────────────────────────────────────────────────────────
    let client = ApiClient::new(&config)?;
    info!("Using Vault backend at '{}'", client.base_url());

    App::new(client).run().await
}
