//! HTML rendering with embedded handlebars templates
//!
//! Templates are compiled into the binary. Handlebars escapes every
//! `{{value}}`, so user-supplied names are safe to interpolate.

use handlebars::Handlebars;
use loanapp_core::LoanQuote;
use serde_json::json;

use crate::service::ReportSummary;

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
];

const TEMPLATES: [(&str, &str); 5] = [
    ("landing", include_str!("../templates/landing.hbs")),
    ("register", include_str!("../templates/register.hbs")),
    ("reports", include_str!("../templates/reports.hbs")),
    ("login_welcome", include_str!("../templates/login_welcome.hbs")),
    ("login_not_found", include_str!("../templates/login_not_found.hbs")),
];

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[source] Box<handlebars::TemplateError>),

    #[error("render error: {0}")]
    Render(#[source] Box<handlebars::RenderError>),
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(e: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(e))
    }
}

impl From<handlebars::RenderError> for RenderError {
    fn from(e: handlebars::RenderError) -> Self {
        Self::Render(Box::new(e))
    }
}

/// Compiled page and fragment templates
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    pub fn landing(&self, quote: &LoanQuote) -> Result<String, RenderError> {
        let data = json!({
            "sample": {
                "borrow": format!("{:.2}", quote.borrow),
                "interest_rate": quote.interest_rate_label(),
                "total_repayment": format!("{:.2}", quote.total_repayment),
            }
        });
        Ok(self.registry.render("landing", &data)?)
    }

    pub fn register_page(&self) -> Result<String, RenderError> {
        Ok(self.registry.render("register", &json!({}))?)
    }

    pub fn reports(&self, summary: &ReportSummary) -> Result<String, RenderError> {
        Ok(self.registry.render("reports", summary)?)
    }

    pub fn login_welcome(&self, firstname: &str) -> Result<String, RenderError> {
        Ok(self
            .registry
            .render("login_welcome", &json!({ "firstname": firstname }))?)
    }

    pub fn login_not_found(&self) -> Result<String, RenderError> {
        Ok(self.registry.render("login_not_found", &json!({}))?)
    }
}
