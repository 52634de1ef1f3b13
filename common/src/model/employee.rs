use serde::{Deserialize, Serialize};

/// An employee record synchronized from the HRIS. Read-only on this side;
/// edits happen in the HRIS and arrive through the sync engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String, // UUID
    /// Identifier in the HRIS, used to match license assignments.
    pub external_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub status: EmployeeStatus,
    /// ISO 8601 date.
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Onboarding,
    Offboarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeSortKey {
    Name,
    Email,
    Department,
    StartDate,
}

/// Case-insensitive substring filter over name, email and department.
/// Operates on the already-fetched page; the server owns pagination.
pub fn filter_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return employees.iter().collect();
    }
    employees
        .iter()
        .filter(|e| {
            e.full_name.to_lowercase().contains(&q)
                || e.email.to_lowercase().contains(&q)
                || e.department
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&q))
                    .unwrap_or(false)
        })
        .collect()
}

/// Stable sort by the chosen column. Missing values (department, start date)
/// sort last regardless of direction.
pub fn sort_employees(employees: &mut [&Employee], key: EmployeeSortKey, ascending: bool) {
    employees.sort_by(|a, b| {
        let ord = match key {
            EmployeeSortKey::Name => a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()),
            EmployeeSortKey::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            EmployeeSortKey::Department => cmp_optional(a.department.as_deref(), b.department.as_deref()),
            EmployeeSortKey::StartDate => cmp_optional(a.start_date.as_deref(), b.start_date.as_deref()),
        };
        if ascending { ord } else { ord.reverse() }
    });
    // Re-sink the missing values after a descending reversal.
    if !ascending {
        let has_value = |e: &Employee| match key {
            EmployeeSortKey::Department => e.department.is_some(),
            EmployeeSortKey::StartDate => e.start_date.is_some(),
            _ => true,
        };
        employees.sort_by_key(|e| !has_value(e));
    }
}

fn cmp_optional(a: Option<&str>, b: Option<&str>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str, email: &str, department: Option<&str>) -> Employee {
        Employee {
            id: format!("id-{email}"),
            external_id: format!("ext-{email}"),
            full_name: name.to_string(),
            email: email.to_string(),
            department: department.map(str::to_string),
            status: EmployeeStatus::Active,
            start_date: None,
        }
    }

    #[test]
    fn filter_matches_name_email_and_department() {
        let list = vec![
            employee("Ana Torres", "ana@corp.com", Some("Engineering")),
            employee("Borja Ruiz", "borja@corp.com", Some("Finance")),
            employee("Carla Vega", "carla@corp.com", None),
        ];
        assert_eq!(filter_employees(&list, "ana").len(), 1);
        assert_eq!(filter_employees(&list, "CORP.COM").len(), 3);
        assert_eq!(filter_employees(&list, "fina").len(), 1);
        assert_eq!(filter_employees(&list, "").len(), 3);
        assert!(filter_employees(&list, "zzz").is_empty());
    }

    #[test]
    fn sort_by_department_sinks_missing_values() {
        let list = vec![
            employee("A", "a@corp.com", None),
            employee("B", "b@corp.com", Some("Sales")),
            employee("C", "c@corp.com", Some("Engineering")),
        ];
        let mut refs: Vec<&Employee> = list.iter().collect();
        sort_employees(&mut refs, EmployeeSortKey::Department, true);
        assert_eq!(refs[0].email, "c@corp.com");
        assert_eq!(refs[2].email, "a@corp.com");

        sort_employees(&mut refs, EmployeeSortKey::Department, false);
        assert_eq!(refs[0].email, "b@corp.com");
        assert_eq!(refs[2].email, "a@corp.com");
    }
}
