use crate::{ids::switches, model::ProcessInvocation};

///
/// ProductIdentity
///
/// Product name and version reported to the crash subsystem. Compile-time
/// defaults come from the config; white-labelled builds override them with
/// the `--product-name` / `--product-version` switches.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductIdentity {
    pub name: String,
    pub version: String,
}

impl ProductIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Apply the override switches on top of `defaults`. An override given
    /// without a value keeps the default.
    #[must_use]
    pub fn from_invocation(invocation: &ProcessInvocation, defaults: &Self) -> Self {
        let pick = |switch: &str, fallback: &str| {
            invocation
                .switch_value(switch)
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            name: pick(switches::PRODUCT_NAME, &defaults.name),
            version: pick(switches::PRODUCT_VERSION, &defaults.version),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_unless_overridden() {
        let defaults = ProductIdentity::new("Boothost", "1.2.3");

        let plain = ProcessInvocation::from_args(["host"]);
        assert_eq!(ProductIdentity::from_invocation(&plain, &defaults), defaults);

        let branded = ProcessInvocation::from_args([
            "host",
            "--product-name=Acme Browser",
            "--product-version",
        ]);
        assert_eq!(
            ProductIdentity::from_invocation(&branded, &defaults),
            ProductIdentity::new("Acme Browser", "1.2.3")
        );
    }
}
