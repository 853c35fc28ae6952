use crate::infra::{parse_layout, InMemorySessionRepository};
use avalia_ai::error::AppError;
use avalia_ai::valuation::schema::schema;
use avalia_ai::valuation::{
    render, AdvanceOutcome, FieldEdit, FieldId, FieldInput, FormLayout, FormSession, FormView,
    HttpPriceEstimator, ValuationService,
};
use clap::Args;
use std::sync::Arc;

const DEFAULT_DEMO_ESTIMATOR_URL: &str = "http://127.0.0.1:3000/api/estimate-price";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Form layout to walk through (stepped or single_page). Defaults to stepped.
    #[arg(long, value_parser = parse_layout)]
    pub(crate) layout: Option<FormLayout>,
    /// Request a price estimate once the identification fields are filled.
    #[arg(long)]
    pub(crate) estimate: bool,
    /// Estimation endpoint used when --estimate is set.
    #[arg(long)]
    pub(crate) estimator_url: Option<String>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        layout,
        estimate,
        estimator_url,
    } = args;

    let layout = layout.unwrap_or_default();
    let estimator_url = estimator_url.unwrap_or_else(|| DEFAULT_DEMO_ESTIMATOR_URL.to_string());
    let repository = Arc::new(InMemorySessionRepository::default());
    let estimator = Arc::new(HttpPriceEstimator::new(&estimator_url)?);
    let service = ValuationService::new(repository.clone(), estimator, layout);

    println!("Property valuation demo ({layout:?} layout)");
    let session = service.open(None)?;
    let id = session.id().clone();

    let identification = [
        FieldEdit::text(FieldId::PropertyType, "house"),
        FieldEdit::text(FieldId::PropertySubtype, "sobrado"),
        FieldEdit::text(FieldId::Cep, "01310-100"),
        FieldEdit::text(FieldId::Number, "1578"),
        FieldEdit::text(FieldId::Address, "Av. Paulista, 1578 - Bela Vista, São Paulo"),
    ];
    let session = service.edit(&id, &identification)?;
    print_view(&session);

    if estimate {
        let session = service.estimate(&id).await?;
        let view = render(&session);
        println!(
            "\nEstimate: {}",
            view.estimate.text.as_deref().unwrap_or("(none)")
        );
    }

    let remaining = [
        FieldEdit::new(FieldId::PricePerSqm, FieldInput::Decimal(9850.0)),
        FieldEdit::new(FieldId::Bedrooms, FieldInput::Number(4)),
        FieldEdit::new(FieldId::Suites, FieldInput::Number(6)),
        FieldEdit::new(FieldId::Bathrooms, FieldInput::Number(3)),
        FieldEdit::new(FieldId::BathroomsWithShower, FieldInput::Number(2)),
        FieldEdit::new(FieldId::LivingRooms, FieldInput::Number(2)),
        FieldEdit::new(FieldId::Kitchens, FieldInput::Number(1)),
        FieldEdit::new(FieldId::ParkingSpaces, FieldInput::Number(2)),
        FieldEdit::flag(FieldId::HasPool, true),
        FieldEdit::new(FieldId::PoolSizeSqm, FieldInput::Number(32)),
        FieldEdit::flag(FieldId::PoolHeated, true),
        FieldEdit::text(FieldId::PoolCondition, "4"),
        FieldEdit::text(FieldId::PoolPurchaseWeight, "3"),
        FieldEdit::flag(FieldId::DecorModern, true),
        FieldEdit::text(FieldId::ExteriorPaint, "4"),
        FieldEdit::text(FieldId::InteriorPaint, "5"),
        FieldEdit::flag(FieldId::Furnished, true),
        FieldEdit::text(FieldId::FurnitureCondition, "3"),
    ];
    service.edit(&id, &remaining)?;

    loop {
        let (session, outcome) = service.advance(&id)?;
        match outcome {
            AdvanceOutcome::Moved(_) => print_view(&session),
            AdvanceOutcome::Submitted => {
                print_submission(&session);
                break;
            }
        }
    }

    println!("\nSessions stored: {}", repository.len());
    Ok(())
}

pub(crate) fn print_schema() -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(&schema()).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn print_view(session: &FormSession) {
    let view = render(session);
    render_view(&view);
}

fn render_view(view: &FormView) {
    if let Some(step) = &view.step {
        println!("\n{} · {}", step.progress_label, step.title);
        println!("  {}", step.description);
    } else {
        println!("\nAll sections");
    }

    for section in &view.sections {
        println!("  [{}]", section.title);
        for field in &section.fields {
            println!("    - {} ({}): {}", field.label, field.kind, field.value);
            if !field.options.is_empty() {
                let options = field
                    .options
                    .iter()
                    .map(|option| option.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("        options: {options}");
            }
            if let Some(help) = field.help {
                println!("        help: {help}");
            }
        }
    }

    if let Some(step) = &view.step {
        let back = if step.can_retreat {
            format!("{} | ", step.prev_label)
        } else {
            String::new()
        };
        println!("  {back}{}", step.next_label);
    }
}

fn print_submission(session: &FormSession) {
    let Some(submission) = session.submission() else {
        return;
    };
    println!("\n{}", submission.confirmation);
    println!(
        "  submitted at {}",
        submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match serde_json::to_string_pretty(&submission.data) {
        Ok(payload) => println!("{payload}"),
        Err(err) => println!("  (payload unavailable: {err})"),
    }
}
