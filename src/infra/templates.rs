use crate::error::AppError;
use tera::{Context, Tera};
use tracing::debug;

/// Templates read from disk when the cache is disabled.
pub const TEMPLATE_GLOB: &str = "src/templates/**/*.html";

const EMBEDDED: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("general.html", include_str!("../templates/general.html")),
    ("suite.html", include_str!("../templates/suite.html")),
    ("contact.html", include_str!("../templates/contact.html")),
    ("search-availability.html", include_str!("../templates/search-availability.html")),
    ("choose-room.html", include_str!("../templates/choose-room.html")),
    ("make-reservation.html", include_str!("../templates/make-reservation.html")),
    ("reservation-summary.html", include_str!("../templates/reservation-summary.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("admin/base.html", include_str!("../templates/admin/base.html")),
    ("admin/dashboard.html", include_str!("../templates/admin/dashboard.html")),
    ("admin/reservations-new.html", include_str!("../templates/admin/reservations-new.html")),
    ("admin/reservations-all.html", include_str!("../templates/admin/reservations-all.html")),
    ("admin/reservation-show.html", include_str!("../templates/admin/reservation-show.html")),
    ("admin/reservation-calendar.html", include_str!("../templates/admin/reservation-calendar.html")),
    ("email/confirmation.html", include_str!("../templates/email/confirmation.html")),
];

pub struct TemplateRenderer {
    cached: Option<Tera>,
}

impl TemplateRenderer {
    /// With `use_cache` the embedded set is parsed once; otherwise every render
    /// re-reads [`TEMPLATE_GLOB`] so edits show up without a restart.
    pub fn new(use_cache: bool) -> Result<Self, tera::Error> {
        let cached = if use_cache { Some(Self::embedded()?) } else { None };
        Ok(Self { cached })
    }

    pub fn embedded() -> Result<Tera, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(EMBEDDED.iter().copied())?;
        Ok(tera)
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, AppError> {
        match &self.cached {
            Some(tera) => Ok(tera.render(name, context)?),
            None => {
                debug!("Loading templates from {}", TEMPLATE_GLOB);
                let tera = Tera::new(TEMPLATE_GLOB)?;
                Ok(tera.render(name, context)?)
            }
        }
    }
}
