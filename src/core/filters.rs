use crate::models::{Profile, SearchCriteria};

/// Check if a profile satisfies a saved search's attribute constraints
///
/// Used by the in-memory search store; the PostgreSQL store evaluates the
/// same constraints in SQL.
#[inline]
pub fn matches_criteria(profile: &Profile, criteria: &SearchCriteria) -> bool {
    // Check age range
    if criteria.min_age.is_some_and(|min| profile.age < min)
        || criteria.max_age.is_some_and(|max| profile.age > max)
    {
        return false;
    }

    // Check height range
    if criteria.min_height_in.is_some_and(|min| profile.height_in < min)
        || criteria.max_height_in.is_some_and(|max| profile.height_in > max)
    {
        return false;
    }

    if let Some(sex) = &criteria.sex {
        if !sex.eq_ignore_ascii_case(&profile.sex) {
            return false;
        }
    }

    if let Some(interested_in) = &criteria.interested_in {
        if !interested_in.eq_ignore_ascii_case(&profile.interested_in) {
            return false;
        }
    }

    if let Some(zipcode) = &criteria.zipcode {
        if zipcode != &profile.zipcode {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileId;
    use chrono::Utc;

    fn create_test_profile(age: i32, sex: &str, height_in: i32) -> Profile {
        Profile {
            id: ProfileId(1),
            user_id: 1,
            nick_name: "tester".to_string(),
            age,
            sex: sex.to_string(),
            interested_in: "Female".to_string(),
            zipcode: "94110".to_string(),
            height_in,
            hidden: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let profile = create_test_profile(40, "Male", 70);
        assert!(matches_criteria(&profile, &SearchCriteria::default()));
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let criteria = SearchCriteria {
            min_age: Some(25),
            max_age: Some(30),
            ..Default::default()
        };

        assert!(matches_criteria(&create_test_profile(25, "Male", 70), &criteria));
        assert!(matches_criteria(&create_test_profile(30, "Male", 70), &criteria));
        assert!(!matches_criteria(&create_test_profile(31, "Male", 70), &criteria));
        assert!(!matches_criteria(&create_test_profile(24, "Male", 70), &criteria));
    }

    #[test]
    fn test_sex_and_zipcode() {
        let criteria = SearchCriteria {
            sex: Some("female".to_string()),
            zipcode: Some("94110".to_string()),
            ..Default::default()
        };

        assert!(matches_criteria(&create_test_profile(30, "Female", 64), &criteria));
        assert!(!matches_criteria(&create_test_profile(30, "Male", 64), &criteria));
    }

    #[test]
    fn test_height_range() {
        let criteria = SearchCriteria {
            min_height_in: Some(60),
            max_height_in: Some(72),
            ..Default::default()
        };

        assert!(matches_criteria(&create_test_profile(30, "Male", 72), &criteria));
        assert!(!matches_criteria(&create_test_profile(30, "Male", 73), &criteria));
    }
}
