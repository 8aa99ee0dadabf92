//! Density growth: build up when building out is blocked

use crate::core::config::GrowthConfig;
use crate::places::District;

/// Raise density one step and resize the population to match
///
/// No-op returning false once the district is at maximum density.
pub fn attempt_density_growth(district: &mut District, config: &GrowthConfig) -> bool {
    if district.density >= config.max_density {
        return false;
    }

    let density = district
        .density
        .saturating_add(config.density_growth_amount)
        .min(config.max_density);
    if density == district.density {
        return false;
    }

    district.density = density;
    let capacity = config.population_capacity(district.area, density);
    district.population.resize(capacity);
    true
}
