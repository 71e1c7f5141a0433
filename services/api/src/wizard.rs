use crate::infra::{build_gateway, memory_gateway};
use application_form::config::AppConfig;
use application_form::error::AppError;
use application_form::telemetry::{self, LogTarget};
use application_form::workflows::application::choices;
use application_form::workflows::application::steps::step_of;
use application_form::workflows::application::{
    ApplicationField, ApplicationForm, SubmissionError, SubmissionGateway, SubmitOutcome,
    FORM_STEPS,
};
use clap::Args;
use std::io::{self, BufRead, Write};
use tracing::info;

const BACK_COMMAND: &str = "<";
const QUIT_COMMAND: &str = ":q";

const SUCCESS_NOTICE: &str =
    "Your application has been received. I'll review it and get back to you if you're a match. Good luck!";

#[derive(Args, Debug, Default)]
pub(crate) struct FillArgs {
    /// Keep the submission in memory instead of writing to the hosted store
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Debug, PartialEq)]
pub(crate) enum WizardOutcome {
    Submitted,
    Abandoned,
    /// The store refused the record and the applicant declined to retry.
    Failed(SubmissionError),
}

enum Reply {
    Value(String),
    Keep,
    Back,
    Quit,
}

/// Line-oriented front end over [`ApplicationForm`].
pub(crate) struct FormWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> FormWizard<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) async fn run<G>(
        &mut self,
        form: &mut ApplicationForm,
        gateway: &G,
    ) -> io::Result<WizardOutcome>
    where
        G: SubmissionGateway + ?Sized,
    {
        writeln!(self.output, "Application Form")?;
        writeln!(
            self.output,
            "Think you have what it takes? Fill out this application honestly."
        )?;
        writeln!(
            self.output,
            "Press enter to keep an answer, `{BACK_COMMAND}` to go back, `{QUIT_COMMAND}` to quit."
        )?;

        'steps: loop {
            let step = form.current_step();
            let (position, total) = form.progress();
            writeln!(self.output)?;
            writeln!(self.output, "Step {position} of {total}: {}", step.title)?;
            writeln!(self.output, "{}", step.description)?;

            for &field in step.fields {
                match self.prompt_field(form, field)? {
                    Reply::Value(value) => form.update_field(field, value),
                    Reply::Keep => {}
                    Reply::Back => {
                        if !form.retreat() {
                            writeln!(self.output, "Already on the first step.")?;
                        }
                        continue 'steps;
                    }
                    Reply::Quit => {
                        writeln!(self.output, "Application abandoned; nothing was submitted.")?;
                        return Ok(WizardOutcome::Abandoned);
                    }
                }
            }

            if !form.is_last_step() {
                if !form.advance() {
                    self.print_errors(form)?;
                }
                continue;
            }

            loop {
                match form.submit(gateway).await {
                    SubmitOutcome::Submitted(_) | SubmitOutcome::AlreadySubmitted => {
                        writeln!(self.output, "{SUCCESS_NOTICE}")?;
                        return Ok(WizardOutcome::Submitted);
                    }
                    SubmitOutcome::Invalid => {
                        self.print_errors(form)?;
                        break;
                    }
                    SubmitOutcome::NotOnFinalStep => break,
                    SubmitOutcome::Failed(error) => {
                        writeln!(self.output, "Submission failed: {}", error.message())?;
                        if !self.confirm("Try again? [Y/n] ")? {
                            return Ok(WizardOutcome::Failed(error));
                        }
                    }
                }
            }
        }
    }

    fn prompt_field(&mut self, form: &ApplicationForm, field: ApplicationField) -> io::Result<Reply> {
        let marker = if field.is_required() { " *" } else { "" };
        writeln!(self.output, "{}{marker}", field.label())?;
        let options = field.choices();
        if let Some(options) = options {
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "  {}) {}", index + 1, option.label)?;
            }
        }

        loop {
            let current = form.fields().value(field);
            if current.is_empty() {
                write!(self.output, "> ")?;
            } else {
                write!(self.output, "[{current}] > ")?;
            }
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Reply::Quit);
            };
            let answer = line.trim();
            match answer {
                BACK_COMMAND => return Ok(Reply::Back),
                QUIT_COMMAND => return Ok(Reply::Quit),
                "" => return Ok(Reply::Keep),
                _ => {}
            }

            let Some(options) = options else {
                return Ok(Reply::Value(answer.to_string()));
            };
            match choices::resolve(options, answer) {
                Some(token) => return Ok(Reply::Value(token.to_string())),
                None => writeln!(
                    self.output,
                    "Choose one of the listed options by number or name."
                )?,
            }
        }
    }

    fn print_errors(&mut self, form: &ApplicationForm) -> io::Result<()> {
        writeln!(self.output, "Please fix the following:")?;
        for (field, message) in form.errors().iter() {
            match step_of(field) {
                Some(step) if step != form.step() => {
                    writeln!(self.output, "  - {message} (step {})", step + 1)?
                }
                _ => writeln!(self.output, "  - {message}")?,
            }
        }
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        Ok(matches!(
            line.trim().to_ascii_lowercase().as_str(),
            "" | "y" | "yes"
        ))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Write the step table: titles, fields and the tokens each choice accepts.
pub(crate) fn print_steps(out: &mut impl Write) -> io::Result<()> {
    for (index, step) in FORM_STEPS.iter().enumerate() {
        writeln!(out, "{}. {} - {}", index + 1, step.title, step.description)?;
        for field in step.fields {
            let marker = if field.is_required() { "required" } else { "optional" };
            writeln!(out, "   {} ({}, {marker})", field.label(), field.key())?;
            if let Some(options) = field.choices() {
                let tokens: Vec<&str> = options.iter().map(|option| option.token).collect();
                writeln!(out, "      {}", tokens.join(" | "))?;
            }
        }
    }
    Ok(())
}

pub(crate) async fn run(args: FillArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_target(&config.telemetry, LogTarget::Stderr)?;

    let gateway = if args.dry_run {
        info!("dry run; submission stays in memory");
        memory_gateway(&config.store.table)
    } else {
        build_gateway(&config.store)?
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut wizard = FormWizard::new(stdin.lock(), stdout.lock());
    let mut form = ApplicationForm::new();

    match wizard.run(&mut form, gateway.as_ref()).await? {
        WizardOutcome::Submitted | WizardOutcome::Abandoned => Ok(()),
        WizardOutcome::Failed(error) => Err(AppError::Submission(error)),
    }
}
