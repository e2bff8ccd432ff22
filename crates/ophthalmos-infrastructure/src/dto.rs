//! Wire-format DTOs for the vision backend REST API.
//!
//! The backend speaks camelCase JSON and stores cone values as floats, so
//! these types sit between the domain models and the HTTP client.

use ophthalmos_core::adaptation::AdaptationFactors;
use ophthalmos_core::cone::SensitivityProfile;
use ophthalmos_core::performance::{PerformanceResult, PerformanceStats};
use ophthalmos_core::user::UserId;
use serde::{Deserialize, Serialize};

/// `POST /api/users` request body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest<'a> {
    pub name: &'a str,
}

/// `POST /api/users` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: String,
}

/// Cone values as the backend stores them (0-100, possibly fractional).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConeValuesDto {
    pub l_cone: f64,
    pub m_cone: f64,
    pub s_cone: f64,
}

impl From<&SensitivityProfile> for ConeValuesDto {
    fn from(profile: &SensitivityProfile) -> Self {
        Self {
            l_cone: f64::from(profile.l_cone),
            m_cone: f64::from(profile.m_cone),
            s_cone: f64::from(profile.s_cone),
        }
    }
}

impl From<ConeValuesDto> for SensitivityProfile {
    fn from(dto: ConeValuesDto) -> Self {
        SensitivityProfile::new(
            percentage(dto.l_cone),
            percentage(dto.m_cone),
            percentage(dto.s_cone),
        )
    }
}

fn percentage(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// `POST /api/cone-tests` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConeTestRequest<'a> {
    pub user_id: &'a str,
    #[serde(flatten)]
    pub values: ConeValuesDto,
}

/// A stored cone test as returned by `GET /api/cone-tests/{id}/latest`.
///
/// Extra fields (`testId`, `testDate`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConeTestRecord {
    #[serde(flatten)]
    pub values: ConeValuesDto,
}

/// `POST /api/color-adaptation` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationFactorsDto {
    pub red_adjustment: f64,
    pub green_adjustment: f64,
    pub blue_adjustment: f64,
    pub contrast_boost: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl From<AdaptationFactorsDto> for AdaptationFactors {
    fn from(dto: AdaptationFactorsDto) -> Self {
        AdaptationFactors {
            red_adjustment: dto.red_adjustment,
            green_adjustment: dto.green_adjustment,
            blue_adjustment: dto.blue_adjustment,
            contrast_boost: dto.contrast_boost,
            recommendations: dto.recommendations,
        }
    }
}

/// `POST /api/performance-tests` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePerformanceRequest<'a> {
    pub user_id: &'a str,
    pub test_type: &'static str,
    pub score: u32,
    pub time: f64,
    pub difficulty: &'a str,
}

impl<'a> SavePerformanceRequest<'a> {
    pub fn new(user_id: &'a UserId, result: &'a PerformanceResult) -> Self {
        Self {
            user_id: user_id.as_str(),
            test_type: result.mode.as_str(),
            score: result.score,
            time: f64::from(result.elapsed_seconds),
            difficulty: &result.difficulty,
        }
    }
}

/// `GET /api/performance-tests/{id}/stats` response body.
///
/// An empty history comes back with integer zeros, which serde accepts as
/// floats.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStatsDto {
    pub total_tests: u32,
    pub average_score: f64,
    pub average_time: f64,
    pub improvement: f64,
}

impl From<PerformanceStatsDto> for PerformanceStats {
    fn from(dto: PerformanceStatsDto) -> Self {
        PerformanceStats {
            total_tests: dto.total_tests,
            average_score: dto.average_score,
            average_time: dto.average_time,
            improvement: dto.improvement,
        }
    }
}
