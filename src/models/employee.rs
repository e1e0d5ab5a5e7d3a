//! Employee model and viewer scoping.
//!
//! This module defines the [`Employee`] directory entry consumed by the engine
//! and the [`Viewer`] that decides whose rows a reconciliation pass returns.

use serde::{Deserialize, Serialize};

/// Represents an employee as supplied by the employees directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
}

impl Employee {
    /// Returns the name shown on the statistics grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Asha".to_string(),
    ///     last_name: "Rao".to_string(),
    /// };
    /// assert_eq!(employee.display_name(), "Asha Rao");
    /// ```
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// The role of whoever is viewing the statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees every employee in the directory.
    Admin,
    /// Sees only their own attendance.
    Employee,
}

/// The identity a reconciliation pass is run on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// The viewer's role.
    pub role: Role,
    /// The viewer's own employee identifier.
    pub employee_id: String,
}

impl Viewer {
    /// An administrator viewer.
    pub fn admin(employee_id: impl Into<String>) -> Self {
        Self {
            role: Role::Admin,
            employee_id: employee_id.into(),
        }
    }

    /// A regular employee viewer, restricted to their own rows.
    pub fn employee(employee_id: impl Into<String>) -> Self {
        Self {
            role: Role::Employee,
            employee_id: employee_id.into(),
        }
    }

    /// Returns true if this viewer may see `employee_id`.
    pub fn can_view(&self, employee_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Employee => self.employee_id == employee_id,
        }
    }

    /// Filters the directory down to the employees this viewer may see, keeping order.
    pub fn visible<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.can_view(&e.id)).collect()
    }
}
