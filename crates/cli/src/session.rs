use crate::form::{FormCommand, FormSession, HELP};
use anyhow::Context;
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use wildcard_core::client::JournalApi;
use wildcard_core::domain::analysis::AnalysisResult;
use wildcard_core::domain::chat::ChatMessage;
use wildcard_core::domain::form::InvestmentFormData;
use wildcard_core::state::Back;
use wildcard_core::view::form::NextAction;
use wildcard_core::view::quiz::{AnswerView, QuizView};
use wildcard_core::view::result::ResultView;
use wildcard_core::view::screens::{HomeAction, HomeView, LoadingView, SplashView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Home,
    Quit,
}

pub struct Session<'a, A, R, W> {
    api: &'a A,
    input: R,
    out: W,
    today: NaiveDate,
}

impl<'a, A, R, W> Session<'a, A, R, W>
where
    A: JournalApi,
    R: BufRead,
    W: Write,
{
    pub fn new(api: &'a A, input: R, out: W, today: NaiveDate) -> Self {
        Self {
            api,
            input,
            out,
            today,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{SplashView}")?;
        loop {
            writeln!(self.out, "{HomeView}")?;
            let Some(line) = self.prompt("선택 (1/2, q 종료)")? else {
                return Ok(());
            };
            if line == "q" {
                return Ok(());
            }

            let flow = match HomeView::choose(&line) {
                Some(HomeAction::StartAnalysis) => self.form_flow().await?,
                Some(HomeAction::QuickAnalysis) => {
                    let form = InvestmentFormData::quick_sample();
                    match self.analyze(&form).await? {
                        Some(result) => self.results_flow(result).await?,
                        None => Flow::Home,
                    }
                }
                None => {
                    writeln!(self.out, "1 또는 2를 입력하세요.")?;
                    Flow::Home
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    async fn form_flow(&mut self) -> anyhow::Result<Flow> {
        let mut form = FormSession::new(self.today);
        loop {
            writeln!(self.out, "{}", form.view())?;
            let Some(line) = self.prompt("입력 (/help)")? else {
                return Ok(Flow::Quit);
            };

            let cmd = match FormCommand::parse(&line, form.state.step()) {
                Ok(cmd) => cmd,
                Err(err) => {
                    writeln!(self.out, "⚠ {err:#}")?;
                    continue;
                }
            };

            match cmd {
                FormCommand::Quit => return Ok(Flow::Quit),
                FormCommand::Help => writeln!(self.out, "{HELP}")?,
                FormCommand::Back => {
                    if form.state.prev_step() == Back::LeftForm {
                        return Ok(Flow::Home);
                    }
                }
                FormCommand::Next if form.state.is_next_disabled() => {
                    writeln!(self.out, "⚠ 이 단계의 입력을 먼저 완료하세요.")?;
                }
                FormCommand::Next => match form.view().next_action() {
                    NextAction::Advance => form.state.next_step(),
                    NextAction::Analyze => {
                        if let Some(result) = self.analyze(&form.state.form).await? {
                            return self.results_flow(result).await;
                        }
                    }
                },
                edit => {
                    if let Err(err) = form.apply(edit) {
                        writeln!(self.out, "⚠ {err:#}")?;
                    }
                }
            }
        }
    }

    // `None` when the request failed; the caller stays where it was.
    async fn analyze(&mut self, form: &InvestmentFormData) -> anyhow::Result<Option<AnalysisResult>> {
        writeln!(self.out, "{LoadingView}")?;
        match self.api.analyze(form).await {
            Ok(result) => {
                tracing::info!(request_id = ?result.request_id(), "analysis received");
                Ok(Some(result))
            }
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "analysis failed");
                writeln!(self.out, "⚠ 분석에 실패했습니다: {err}")?;
                Ok(None)
            }
        }
    }

    async fn results_flow(&mut self, result: AnalysisResult) -> anyhow::Result<Flow> {
        writeln!(self.out, "{}", ResultView(&result))?;
        let mut history: Vec<ChatMessage> = Vec::new();
        loop {
            let Some(line) = self.prompt("1) 퀴즈 풀기  2) 어드바이저와 대화  3) 홈으로  q) 종료")?
            else {
                return Ok(Flow::Quit);
            };
            match line.as_str() {
                "1" => {
                    if self.quiz_flow(&result).await? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                "2" => {
                    if self.chat_flow(&mut history).await? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                "3" => return Ok(Flow::Home),
                "q" => return Ok(Flow::Quit),
                _ => writeln!(self.out, "1, 2, 3 또는 q를 입력하세요.")?,
            }
        }
    }

    async fn quiz_flow(&mut self, result: &AnalysisResult) -> anyhow::Result<Flow> {
        let quizzes = match self.api.generate_quiz(result).await {
            Ok(quizzes) => quizzes,
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "quiz generation failed");
                writeln!(self.out, "⚠ 퀴즈를 불러오지 못했습니다: {err}")?;
                return Ok(Flow::Home);
            }
        };
        if quizzes.is_empty() {
            writeln!(self.out, "준비된 퀴즈가 없습니다.")?;
            return Ok(Flow::Home);
        }

        for (i, quiz) in quizzes.iter().enumerate() {
            writeln!(self.out, "{}", QuizView { number: i + 1, quiz })?;
            if quiz.options.is_empty() {
                continue;
            }
            let index = loop {
                let Some(line) = self.prompt("답 번호")? else {
                    return Ok(Flow::Quit);
                };
                match line.parse::<usize>() {
                    Ok(n) if (1..=quiz.options.len()).contains(&n) => break n - 1,
                    _ => writeln!(self.out, "1-{} 사이의 번호를 입력하세요.", quiz.options.len())?,
                }
            };
            writeln!(self.out, "{}", AnswerView { quiz, index })?;
        }
        Ok(Flow::Home)
    }

    async fn chat_flow(&mut self, history: &mut Vec<ChatMessage>) -> anyhow::Result<Flow> {
        writeln!(self.out, "어드바이저에게 질문하세요. 빈 줄을 입력하면 돌아갑니다.")?;
        loop {
            let Some(message) = self.prompt("나")? else {
                return Ok(Flow::Quit);
            };
            if message.is_empty() {
                return Ok(Flow::Home);
            }

            match self.api.chat(history, &message).await {
                Ok(reply) => {
                    writeln!(self.out, "어드바이저: {}", reply.message)?;
                    history.push(ChatMessage::user(message));
                    history.push(ChatMessage::assistant(reply.message));
                }
                Err(err) => {
                    sentry_anyhow::capture_anyhow(&err);
                    tracing::error!(error = %err, "chat failed");
                    writeln!(self.out, "⚠ 답변을 받지 못했습니다: {err}")?;
                }
            }
        }
    }

    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{label} > ")?;
        self.out.flush().context("failed to flush output")?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
