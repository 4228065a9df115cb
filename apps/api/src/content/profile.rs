//! In-memory placeholder data for the home page.

use serde::Serialize;

use crate::content::document::Frontmatter;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub frontmatter: Frontmatter,
    pub summary: String,
    pub skill_categories: Vec<SkillCategory>,
    /// Every skill that has a logo, across categories, in display order.
    pub all_skills_with_logos: Vec<Skill>,
    pub experience: Vec<ExperienceItem>,
}

const LOGO_PLACEHOLDER: &str = "https://placehold.co/60x60.png";

fn skills(entries: &[(&str, bool)]) -> Vec<Skill> {
    entries
        .iter()
        .map(|(name, has_logo)| Skill {
            name: name.to_string(),
            logo_url: has_logo.then(|| LOGO_PLACEHOLDER.to_string()),
        })
        .collect()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Profile {
    pub fn placeholder() -> Self {
        let mut profile = Profile {
            frontmatter: Frontmatter {
                name: Some("Jane R. Doe".to_string()),
                title: Some("Senior Software Engineer & AI Solutions Architect".to_string()),
                tagline: Some("Building Innovative Solutions with a Passion for AI".to_string()),
                profile_image: Some("https://placehold.co/300x300.png".to_string()),
                data_ai_hint: Some("professional portrait".to_string()),
                email: Some("jane.r.doe@example.com".to_string()),
                linkedin: Some("linkedin.com/in/janerdoe".to_string()),
                github: Some("github.com/janerdoe".to_string()),
                cv_url: Some("/jane-r-doe-resume.pdf".to_string()),
                ..Frontmatter::default()
            },
            summary: "A results-oriented Senior Software Engineer with 7+ years of experience \
                      developing and architecting scalable software, leading cross-functional \
                      teams, and applying AI/ML to business problems."
                .to_string(),
            skill_categories: vec![
                SkillCategory {
                    category: "Core Technologies".to_string(),
                    skills: skills(&[
                        ("Python", true),
                        ("Go", true),
                        ("TypeScript", true),
                        ("React", true),
                        ("Tailwind CSS", true),
                        ("ShadCN UI", false),
                    ]),
                },
                SkillCategory {
                    category: "AI & Machine Learning".to_string(),
                    skills: skills(&[
                        ("TensorFlow", true),
                        ("PyTorch", true),
                        ("Natural Language Processing (NLP)", false),
                        ("MLOps (Kubeflow, MLflow)", false),
                    ]),
                },
                SkillCategory {
                    category: "Cloud & DevOps".to_string(),
                    skills: skills(&[
                        ("AWS", true),
                        ("Docker", true),
                        ("Kubernetes", true),
                        ("CI/CD (Jenkins, GitLab CI)", false),
                    ]),
                },
            ],
            experience: vec![
                ExperienceItem {
                    title: "Lead AI Engineer".to_string(),
                    company: "QuantumLeap AI".to_string(),
                    dates: "2020 - Present".to_string(),
                    responsibilities: lines(&[
                        "Designed a predictive analytics platform with Python, TensorFlow and Kubeflow, raising client operational efficiency by 25%.",
                        "Led a team of 5 AI engineers.",
                    ]),
                },
                ExperienceItem {
                    title: "Senior Software Developer".to_string(),
                    company: "Tech Solutions Global".to_string(),
                    dates: "2017 - 2020".to_string(),
                    responsibilities: lines(&[
                        "Maintained backend services for a large e-commerce platform on Spring Boot microservices.",
                        "Implemented CI/CD pipelines, reducing deployment times by 40%.",
                    ]),
                },
                ExperienceItem {
                    title: "Software Engineer".to_string(),
                    company: "Alpha Innovations".to_string(),
                    dates: "2015 - 2017".to_string(),
                    responsibilities: lines(&[
                        "Built SaaS features with Django and PostgreSQL.",
                    ]),
                },
            ],
            all_skills_with_logos: Vec::new(),
        };
        profile.all_skills_with_logos = skills_with_logos(&profile.skill_categories);
        profile
    }
}

fn skills_with_logos(categories: &[SkillCategory]) -> Vec<Skill> {
    categories
        .iter()
        .flat_map(|c| c.skills.iter())
        .filter(|s| s.logo_url.is_some())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_serializes_in_camel_case() {
        let json = serde_json::to_value(Profile::placeholder()).unwrap();
        assert_eq!(json["frontmatter"]["name"], "Jane R. Doe");
        assert_eq!(json["frontmatter"]["cvUrl"], "/jane-r-doe-resume.pdf");
        assert!(json["skillCategories"].as_array().unwrap().len() >= 3);
        assert!(json["skillCategories"][0]["skills"][5].get("logoUrl").is_none());
    }

    #[test]
    fn test_skills_with_logos_skips_logo_less_entries() {
        let profile = Profile::placeholder();
        let logos = &profile.all_skills_with_logos;
        assert!(logos.iter().all(|s| s.logo_url.is_some()));
        assert!(!logos.iter().any(|s| s.name == "ShadCN UI"));
        assert_eq!(logos.first().map(|s| s.name.as_str()), Some("Python"));
    }

    #[test]
    fn test_skills_with_logos_is_serialized() {
        let json = serde_json::to_value(Profile::placeholder()).unwrap();
        let logos = json["allSkillsWithLogos"].as_array().unwrap();
        assert_eq!(logos.len(), 10);
        assert!(logos.iter().all(|s| s.get("logoUrl").is_some()));
    }
}
