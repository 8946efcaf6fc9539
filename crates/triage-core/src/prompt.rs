use serde::{Deserialize, Deserializer, Serialize};

/// Assistant persona the model is asked to adopt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    #[default]
    #[serde(rename = "SRE Expert")]
    SreExpert,
    #[serde(rename = "Cloud Engineer")]
    CloudEngineer,
    #[serde(rename = "DevOps Mentor")]
    DevOpsMentor,
    #[serde(rename = "Linux Troubleshooter")]
    LinuxTroubleshooter,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::SreExpert,
        Role::CloudEngineer,
        Role::DevOpsMentor,
        Role::LinuxTroubleshooter,
    ];

    /// Label shown to users and written to the incident log
    pub fn label(&self) -> &'static str {
        match self {
            Role::SreExpert => "SRE Expert",
            Role::CloudEngineer => "Cloud Engineer",
            Role::DevOpsMentor => "DevOps Mentor",
            Role::LinuxTroubleshooter => "Linux Troubleshooter",
        }
    }

    /// Kebab-case identifier for command lines and config files
    pub fn id(&self) -> &'static str {
        match self {
            Role::SreExpert => "sre-expert",
            Role::CloudEngineer => "cloud-engineer",
            Role::DevOpsMentor => "devops-mentor",
            Role::LinuxTroubleshooter => "linux-troubleshooter",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.label().to_lowercase() == wanted || role.id() == wanted)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Requested tone of the response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    #[default]
    Professional,
    Detailed,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Detailed, Tone::Concise];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Detailed => "Detailed",
            Tone::Concise => "Concise",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown tone: {}", s))
    }
}

// Deserialization goes through `FromStr` so JSON bodies and `triage.toml`
// accept the same spellings as the command line.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Build the troubleshooting prompt sent to the generation service.
///
/// `description` is embedded verbatim; rejecting blank input is the
/// caller's job.
pub fn build_incident_prompt(role: Role, tone: Tone, description: &str) -> String {
    format!(
        r#"You are acting as a {role} with expertise in troubleshooting production issues.
The tone of your response should be {tone}.
Analyze the incident below, identify possible causes, and provide
actionable troubleshooting steps. Include Linux commands, monitoring strategies,
and best practices if relevant.

Incident Description:
{description}
"#,
        role = role.label(),
        tone = tone.label().to_lowercase(),
        description = description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_role_tone_and_description() {
        let description = "Our Kubernetes pods are stuck in CrashLoopBackOff after a new deployment";
        for role in Role::ALL {
            for tone in Tone::ALL {
                let prompt = build_incident_prompt(role, tone, description);
                assert!(prompt.contains(role.label()));
                assert!(prompt.contains(&format!("should be {}.", tone.label().to_lowercase())));
                assert!(prompt.contains(description));
            }
        }
    }

    #[test]
    fn test_prompt_sections() {
        let prompt = build_incident_prompt(Role::LinuxTroubleshooter, Tone::Concise, "load avg 80");
        assert!(prompt.starts_with(
            "You are acting as a Linux Troubleshooter with expertise in troubleshooting production issues.\n"
        ));
        assert!(prompt.contains("identify possible causes"));
        assert!(prompt.contains("actionable troubleshooting steps"));
        assert!(prompt.contains("Linux commands, monitoring strategies,\nand best practices"));
        assert!(prompt.ends_with("Incident Description:\nload avg 80\n"));
    }

    #[test]
    fn test_description_is_not_trimmed() {
        let prompt = build_incident_prompt(Role::SreExpert, Tone::Detailed, "  indented\n\tlog line  ");
        assert!(prompt.contains("Incident Description:\n  indented\n\tlog line  \n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_incident_prompt(Role::DevOpsMentor, Tone::Professional, "x");
        let b = build_incident_prompt(Role::DevOpsMentor, Tone::Professional, "x");
        assert_eq!(a, b);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("SRE Expert".parse::<Role>().unwrap(), Role::SreExpert);
        assert_eq!("cloud engineer".parse::<Role>().unwrap(), Role::CloudEngineer);
        assert_eq!("devops-mentor".parse::<Role>().unwrap(), Role::DevOpsMentor);
        assert_eq!(" Linux Troubleshooter ".parse::<Role>().unwrap(), Role::LinuxTroubleshooter);
        assert!("DBA".parse::<Role>().is_err());
    }

    #[test]
    fn test_tone_parsing() {
        assert_eq!("Professional".parse::<Tone>().unwrap(), Tone::Professional);
        assert_eq!("DETAILED".parse::<Tone>().unwrap(), Tone::Detailed);
        assert!("casual".parse::<Tone>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&Role::DevOpsMentor).unwrap(),
            "\"DevOps Mentor\""
        );
        let role: Role = serde_json::from_str("\"sre-expert\"").unwrap();
        assert_eq!(role, Role::SreExpert);
        let tone: Tone = serde_json::from_str("\"concise\"").unwrap();
        assert_eq!(tone, Tone::Concise);
    }

    #[test]
    fn test_serde_accepts_any_case() {
        let role: Role = serde_json::from_str("\"sre expert\"").unwrap();
        assert_eq!(role, Role::SreExpert);
        let role: Role = serde_json::from_str("\"LINUX TROUBLESHOOTER\"").unwrap();
        assert_eq!(role, Role::LinuxTroubleshooter);
        let tone: Tone = serde_json::from_str("\"CONCISE\"").unwrap();
        assert_eq!(tone, Tone::Concise);

        let err = serde_json::from_str::<Role>("\"DBA\"").unwrap_err();
        assert!(err.to_string().contains("Unknown role: DBA"));
    }
}
