use serde::{Deserialize, Serialize};

/// Land under the building: owned outright, or a rental plot the buyer can
/// optionally redeem from the plot owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotHolding {
    #[serde(rename = "oma")]
    Own,
    #[serde(rename = "valinnainen")]
    OptionalRental,
}

impl PlotHolding {
    pub fn label(&self) -> &'static str {
        match self {
            PlotHolding::Own => "oma",
            PlotHolding::OptionalRental => "valinnainen",
        }
    }
}

/// One flattened listing. Serialized under the Finnish column names the
/// result tables and the spreadsheet export use.
///
/// Records are immutable once extracted; result sets keep arrival order.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyRecord {
    #[serde(rename = "Kohdenumero")]
    pub friendly_id: Option<String>,
    #[serde(rename = "Osoite")]
    pub address: Option<String>,
    #[serde(rename = "Myyntihinta")]
    pub selling_price: Option<f64>,
    #[serde(rename = "Velaton")]
    pub debt_free_price: Option<f64>,
    #[serde(rename = "Lainanosuus")]
    pub loan_share: f64,
    #[serde(rename = "Hoitovastike")]
    pub maintenance_charge: f64,
    #[serde(rename = "Rahoitusvastike")]
    pub financing_charge: f64,
    #[serde(rename = "Koko")]
    pub living_area: Option<f64>,
    #[serde(rename = "Kerros")]
    pub floor_level: Option<i32>,
    #[serde(rename = "Valmistunut")]
    pub construction_year: Option<i32>,
    #[serde(rename = "Tontti")]
    pub plot_holding: Option<PlotHolding>,
    #[serde(rename = "Tontin_lunastusosuus")]
    pub plot_buyout_share: f64,
}

/// Metrics request input: one user-reviewed property with an estimated rent
/// and an assumed interest rate attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceProperty {
    pub kohdenumero: String,
    pub velaton: f64,
    pub myyntihinta: f64,
    pub lainaosuus: f64,
    pub hoitovastike: f64,
    pub valmistunut: i32,
    pub lunastusosuus: f64,
    pub arvioitu_vuokra: f64,
    pub korkotaso: f64,
}

/// Computed metrics for one property. Derived, never stored apart from the
/// request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    pub kohdenumero: String,
    pub kassavirta: f64,
    pub kassavirta_5: f64,
    pub kassavirta_10: f64,
    #[serde(rename = "yield")]
    pub gross_yield: f64,
    #[serde(rename = "ROI")]
    pub roi: f64,
}
