use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    BudgetAmount, CampaignDescription, CampaignId, CampaignRequirements, CampaignStatus,
    CampaignTitle, CategoryId, ProfileId, TypeConstraintError,
};

/// Company-authored request for influencer collaboration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub company_id: ProfileId,
    pub category_id: Option<CategoryId>,
    pub title: CampaignTitle,
    pub description: CampaignDescription,
    pub requirements: CampaignRequirements,
    pub budget: BudgetRange,
    pub status: CampaignStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Campaign {
    pub fn is_owned_by(&self, profile_id: ProfileId) -> bool {
        self.company_id == profile_id
    }
}

/// Campaign together with the records the listing pages show next to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignListing {
    pub campaign: Campaign,
    /// Display name of the owning company.
    pub company_name: Option<String>,
    pub category: Option<Category>,
}

/// Data required to insert a new [`Campaign`]. New campaigns start `active`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCampaign {
    pub company_id: ProfileId,
    pub category_id: Option<CategoryId>,
    pub title: CampaignTitle,
    pub description: CampaignDescription,
    pub requirements: CampaignRequirements,
    pub budget: BudgetRange,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Budget bounds with `min <= max` enforced at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetRange {
    min: BudgetAmount,
    max: BudgetAmount,
}

impl BudgetRange {
    pub fn new(min: BudgetAmount, max: BudgetAmount) -> Result<Self, TypeConstraintError> {
        if min > max {
            return Err(TypeConstraintError::InvertedBudget);
        }
        Ok(Self { min, max })
    }

    /// Rebuilds a range from stored values without re-checking the ordering.
    ///
    /// Rows written before the ordering check existed may be inverted; they
    /// are still displayed as stored.
    pub fn from_stored(min: BudgetAmount, max: BudgetAmount) -> Self {
        Self { min, max }
    }

    pub const fn min(&self) -> BudgetAmount {
        self.min
    }

    pub const fn max(&self) -> BudgetAmount {
        self.max
    }

    /// `"$100"` for a fixed budget, `"$100 - $500"` for a range.
    pub fn format(&self) -> String {
        if self.min == self.max {
            format!("${}", group_thousands(self.min.get()))
        } else {
            format!(
                "${} - ${}",
                group_thousands(self.min.get()),
                group_thousands(self.max.get())
            )
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
