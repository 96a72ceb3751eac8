use log::warn;
use serde::Deserialize;
use serde_this_or_that::as_f64;

use crate::calculator;
use crate::models::property::{PlotHolding, PropertyRecord};

pub const MAINTENANCE_CHARGE: &str = "HOUSING_COMPANY_MAINTENANCE_CHARGE";
pub const PLOT_RENT: &str = "RENTAL_FEE_FOR_THE_PLOT";

/// Raw detail payload from the announcement details endpoint. Never assumed
/// complete: every field is optional or defaulted, and the rest of the crate
/// reads it through the accessor methods below.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    pub friendly_id: Option<String>,
    pub selling_price: Option<f64>,
    // The portal really does spell the field this way.
    #[serde(rename = "debfFreePrice")]
    pub debt_free_price: Option<f64>,
    #[serde(default, deserialize_with = "as_f64")]
    pub debt_share_amount: f64,
    #[serde(default, deserialize_with = "as_f64")]
    pub purchasing_share_of_plot: f64,
    #[serde(default)]
    pub property: PropertyInfo,
    #[serde(rename = "residenceDetailsDTO", default)]
    pub residence_details: ResidenceDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub street_address_free_form: Option<String>,
    #[serde(default)]
    pub periodic_charges: Vec<PeriodicCharge>,
    pub housing_company: Option<HousingCompany>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicCharge {
    pub periodic_charge: Option<String>,
    #[serde(default, deserialize_with = "as_f64")]
    pub price: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingCompany {
    pub plot: Option<Plot>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub holding_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidenceDetails {
    pub construction_finished_year: Option<i32>,
    pub living_area: Option<f64>,
    #[serde(rename = "housingCompanyApartmentInformationDTO", default)]
    pub apartment_information: ApartmentInformation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentInformation {
    pub floor_level: Option<i32>,
}

impl ListingDetail {
    /// Price of the first periodic charge of the given category, 0 when the
    /// category is missing from the listing.
    pub fn periodic_charge(&self, category: &str) -> f64 {
        self.property
            .periodic_charges
            .iter()
            .find(|charge| charge.periodic_charge.as_deref() == Some(category))
            .map(|charge| charge.price)
            .unwrap_or(0.0)
    }

    pub fn address(&self) -> Option<&str> {
        self.property.street_address_free_form.as_deref()
    }

    pub fn construction_year(&self) -> Option<i32> {
        self.residence_details.construction_finished_year
    }

    pub fn living_area(&self) -> Option<f64> {
        self.residence_details.living_area
    }

    pub fn floor_level(&self) -> Option<i32> {
        self.residence_details.apartment_information.floor_level
    }

    /// Normalized plot holding; unknown portal values pass through as absent.
    pub fn plot_holding(&self) -> Option<PlotHolding> {
        let holding_type = self
            .property
            .housing_company
            .as_ref()?
            .plot
            .as_ref()?
            .holding_type
            .as_deref()?;
        match holding_type {
            "OWN" => Some(PlotHolding::Own),
            "OPTIONAL_RENTAL" => Some(PlotHolding::OptionalRental),
            _ => None,
        }
    }
}

/// Flatten one detail payload into a `PropertyRecord`, or drop it when its
/// effective cost (debt-free price minus 10% of the asking price) exceeds
/// the user's absolute ceiling.
///
/// A listing without a resolvable construction year is still kept; its
/// financing charge stays at zero. The same goes for a listing whose loan
/// term has already elapsed, since dividing by the remaining time there is
/// undefined.
pub fn extract_record(
    detail: &ListingDetail,
    user_max_limit: Option<f64>,
    interest_rate: f64,
    current_year: i32,
) -> Option<PropertyRecord> {
    if let Some(limit) = user_max_limit {
        let asking_price = detail.selling_price.unwrap_or_default();
        let debt_free_price = detail.debt_free_price.unwrap_or_default();
        if debt_free_price - 0.1 * asking_price > limit {
            return None;
        }
    }

    let total_charge =
        detail.periodic_charge(MAINTENANCE_CHARGE) + detail.periodic_charge(PLOT_RENT);

    let construction_year = detail.construction_year();
    let loan_share = detail.debt_share_amount;

    let financing_charge = match construction_year {
        Some(year) if loan_share != 0.0 => {
            let remaining = calculator::loan_time_left(year, current_year);
            if remaining > 0 {
                loan_share * interest_rate / 12.0 + loan_share / remaining as f64 / 12.0
            } else {
                warn!(
                    "listing {}: loan term elapsed (built {year}), financing charge left at zero",
                    detail.friendly_id.as_deref().unwrap_or("<unknown>")
                );
                0.0
            }
        }
        _ => 0.0,
    };

    Some(PropertyRecord {
        friendly_id: detail.friendly_id.clone(),
        address: detail.address().map(str::to_string),
        selling_price: detail.selling_price,
        debt_free_price: detail.debt_free_price,
        loan_share,
        maintenance_charge: total_charge,
        financing_charge,
        living_area: detail.living_area(),
        floor_level: detail.floor_level(),
        construction_year,
        plot_holding: detail.plot_holding(),
        plot_buyout_share: detail.purchasing_share_of_plot,
    })
}
