use serde::{Deserialize, Serialize};

/// Operating conditions of one injection molding machine
///
/// Every field is a plain reading. Bounds and defaults belong to the
/// collaborating front end (see [`PARAMETER_CATALOG`]); nothing here
/// validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineParameters {
    /// Melt temperature at injection (°C)
    pub injection_temperature: f64,

    /// Injection pressure (bar)
    pub injection_pressure: f64,

    /// Full cycle time (s)
    pub cycle_time: f64,

    /// Cooling time (s)
    pub cooling_time: f64,

    /// Material viscosity (Pa·s)
    pub viscosity: f64,

    /// Shop floor temperature (°C)
    pub ambient_temperature: f64,

    /// Machine age (years)
    pub machine_age: f64,

    /// Operator experience (months)
    pub operator_experience: f64,

    /// Hours since last maintenance
    pub maintenance_hours: f64,
}

impl Default for MachineParameters {
    fn default() -> Self {
        Self {
            injection_temperature: 180.0,
            injection_pressure: 80.0,
            cycle_time: 15.0,
            cooling_time: 10.0,
            viscosity: 100.0,
            ambient_temperature: 18.0,
            machine_age: 1.0,
            operator_experience: 1.0,
            maintenance_hours: 0.0,
        }
    }
}

impl MachineParameters {
    /// Read a field by its form key
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "injection_temperature" => self.injection_temperature,
            "injection_pressure" => self.injection_pressure,
            "cycle_time" => self.cycle_time,
            "cooling_time" => self.cooling_time,
            "viscosity" => self.viscosity,
            "ambient_temperature" => self.ambient_temperature,
            "machine_age" => self.machine_age,
            "operator_experience" => self.operator_experience,
            "maintenance_hours" => self.maintenance_hours,
            _ => return None,
        };
        Some(value)
    }

    /// Write a field by its form key. Returns `false` for unknown keys.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "injection_temperature" => &mut self.injection_temperature,
            "injection_pressure" => &mut self.injection_pressure,
            "cycle_time" => &mut self.cycle_time,
            "cooling_time" => &mut self.cooling_time,
            "viscosity" => &mut self.viscosity,
            "ambient_temperature" => &mut self.ambient_temperature,
            "machine_age" => &mut self.machine_age,
            "operator_experience" => &mut self.operator_experience,
            "maintenance_hours" => &mut self.maintenance_hours,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// One row of the parameter catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParameterSpec {
    /// Inclusive range check
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Form order, bounds and defaults of every machine parameter
pub const PARAMETER_CATALOG: [ParameterSpec; 9] = [
    ParameterSpec {
        name: "injection_temperature",
        label: "Injection Temperature",
        unit: "°C",
        min: 0.0,
        max: 300.0,
        default: 180.0,
    },
    ParameterSpec {
        name: "injection_pressure",
        label: "Injection Pressure",
        unit: "bar",
        min: 0.0,
        max: 200.0,
        default: 80.0,
    },
    ParameterSpec {
        name: "cycle_time",
        label: "Cycle Time",
        unit: "s",
        min: 0.0,
        max: 60.0,
        default: 15.0,
    },
    ParameterSpec {
        name: "cooling_time",
        label: "Cooling Time",
        unit: "s",
        min: 0.0,
        max: 60.0,
        default: 10.0,
    },
    ParameterSpec {
        name: "viscosity",
        label: "Material Viscosity",
        unit: "Pa·s",
        min: 0.0,
        max: 500.0,
        default: 100.0,
    },
    ParameterSpec {
        name: "ambient_temperature",
        label: "Ambient Temperature",
        unit: "°C",
        min: 0.0,
        max: 50.0,
        default: 18.0,
    },
    ParameterSpec {
        name: "machine_age",
        label: "Machine Age",
        unit: "years",
        min: 0.0,
        max: 20.0,
        default: 1.0,
    },
    ParameterSpec {
        name: "operator_experience",
        label: "Operator Experience",
        unit: "months",
        min: 0.0,
        max: 240.0,
        default: 1.0,
    },
    ParameterSpec {
        name: "maintenance_hours",
        label: "Hours Since Maintenance",
        unit: "h",
        min: 0.0,
        max: 1000.0,
        default: 0.0,
    },
];

/// Look up a catalog entry by form key
pub fn parameter_spec(name: &str) -> Option<&'static ParameterSpec> {
    PARAMETER_CATALOG.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults_match_struct_defaults() {
        let defaults = MachineParameters::default();
        for spec in PARAMETER_CATALOG.iter() {
            assert_eq!(defaults.get(spec.name), Some(spec.default), "{}", spec.name);
            assert!(spec.contains(spec.default));
        }
    }

    #[test]
    fn test_get_and_set_by_name() {
        let mut params = MachineParameters::default();
        assert!(params.set("viscosity", 250.0));
        assert_eq!(params.viscosity, 250.0);
        assert_eq!(params.get("viscosity"), Some(250.0));

        assert!(!params.set("spindle_speed", 1.0));
        assert_eq!(params.get("spindle_speed"), None);
    }

    #[test]
    fn test_range_is_inclusive() {
        let spec = parameter_spec("cycle_time").unwrap();
        assert!(spec.contains(0.0));
        assert!(spec.contains(60.0));
        assert!(!spec.contains(60.01));
        assert!(!spec.contains(-0.5));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let params: MachineParameters =
            serde_json::from_str(r#"{"injection_pressure": 120.0}"#).unwrap();
        assert_eq!(params.injection_pressure, 120.0);
        assert_eq!(params.injection_temperature, 180.0);
        assert_eq!(params.maintenance_hours, 0.0);
    }
}
