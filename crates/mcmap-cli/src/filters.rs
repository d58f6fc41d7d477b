use clap::Args;
use mcmap_core::EstablishmentFilter;

/// Filter flags shared by every data command. Omitted flags mean "All".
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Keep only this region
    #[arg(long)]
    pub region: Option<String>,
    /// Keep only this department
    #[arg(long)]
    pub department: Option<String>,
    /// Keep only this establishment type
    #[arg(long = "type")]
    pub establishment_type: Option<String>,
    /// Keep only this status (accents and case are ignored)
    #[arg(long)]
    pub status: Option<String>,
    /// Keep rows offering any of these services (repeatable)
    #[arg(long = "service")]
    pub services: Vec<String>,
    /// Keep only the row with this exact "Name (City)" label
    #[arg(long)]
    pub search: Option<String>,
    /// Keep only rows with a planned visit
    #[arg(long)]
    pub visits_only: bool,
}

impl FilterArgs {
    pub fn into_filter(self) -> EstablishmentFilter {
        EstablishmentFilter {
            region: self.region,
            department: self.department,
            establishment_type: self.establishment_type,
            status: self.status,
            services: self.services,
            search: self.search,
            visits_only: self.visits_only,
        }
    }
}
