use std::fs;

use quote_core::{get_step_data, validate_step, RequestContext};
use quote_domain::{FlowKind, FormData};

use crate::{
    cli::{
        args::{ConfigCommand, DraftsCommand, StartArgs, ValidateArgs},
        output, prompts,
        script::{self, ScriptedAnswers},
        session::{parse_context, parse_package, Session},
    },
    errors::CliError,
};

pub fn start(session: &Session, args: StartArgs) -> Result<(), CliError> {
    let context = parse_context(args.context.context.as_deref());
    let package = parse_package(&args.package)?;
    let answers = args.answers.as_deref().map(ScriptedAnswers::read).transpose()?;
    let request_context = RequestContext::new(
        format!("quote_cli/{}", env!("CARGO_PKG_VERSION")),
        args.referrer.unwrap_or_default(),
        args.landing_url.as_deref().unwrap_or_default(),
    );

    let mut wizard = session.wizard(context, package, request_context)?;
    wizard.open();
    output::section(format!(
        "{} quotation ({} package, {} steps)",
        context.map(|ctx| ctx.display_name()).unwrap_or("General"),
        package.display_name(),
        wizard.state().total_steps
    ));
    if !wizard.state().form_data.is_blank() {
        output::info("Restored your saved progress");
    }

    let reference = match answers {
        Some(answers) => script::run(&mut wizard, &answers)?,
        None => prompts::run(&mut wizard)?,
    };
    output::success(format!("Quotation request submitted. Reference: {reference}"));
    Ok(())
}

pub fn validate(args: ValidateArgs) -> Result<(), CliError> {
    let context = parse_context(args.context.context.as_deref());
    let raw = fs::read_to_string(&args.file).map_err(|source| CliError::ReadInput {
        path: args.file.clone(),
        source,
    })?;
    let form_data: FormData = serde_json::from_str(&raw)?;

    let step_data = get_step_data(&form_data, args.step, context);
    let result = validate_step(args.step, &step_data, context);
    let title = quote_core::step_kind(args.step, FlowKind::for_context(context))
        .map(|kind| kind.title())
        .unwrap_or("Unknown step");

    if result.is_valid {
        output::success(format!("Step {} ({title}) is valid", args.step));
        return Ok(());
    }
    output::field_errors(&result.errors);
    Err(CliError::StepInvalid {
        step: args.step,
        title: title.to_string(),
        count: result.errors.len(),
    })
}

pub fn drafts(session: &Session, action: DraftsCommand) -> Result<(), CliError> {
    let drafts = session.draft_store()?;
    match action {
        DraftsCommand::Show(context) => {
            let context = parse_context(context.context.as_deref());
            match drafts.load(context) {
                Some(fields) => {
                    output::info(format!("Draft `{}`", drafts.data_key(context)));
                    println!("{}", serde_json::to_string_pretty(&fields)?);
                }
                None => output::info("No saved draft"),
            }
        }
        DraftsCommand::Clear { context, legacy } => {
            let context = parse_context(context.context.as_deref());
            drafts.clear(context);
            if legacy {
                drafts.clear_legacy();
            }
            output::success(format!("Cleared draft `{}`", drafts.data_key(context)));
        }
    }
    Ok(())
}

pub fn config(session: &Session, action: ConfigCommand) -> Result<(), CliError> {
    match action {
        ConfigCommand::Show => {
            output::info(format!(
                "Configuration at {}",
                session.manager().config_path().display()
            ));
            println!("{}", serde_json::to_string_pretty(session.config())?);
            output::info(format!("Drafts: {}", session.drafts_dir().display()));
            output::info(format!("Outbox: {}", session.outbox_dir().display()));
        }
        ConfigCommand::SetTtl { days } => {
            let updated = session
                .manager()
                .update(|config| config.set_draft_ttl_days(days))?;
            output::success(format!(
                "Drafts are now kept for {} day(s)",
                updated.draft_ttl_days
            ));
        }
    }
    Ok(())
}
