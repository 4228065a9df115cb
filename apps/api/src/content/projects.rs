//! In-memory placeholder data for the projects page.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
}

const IMAGE_PLACEHOLDER: &str = "https://placehold.co/600x400.png";
/// Link target used until a project has a real repository or deployment.
const LINK_PLACEHOLDER: &str = "#";

struct Seed {
    title: &'static str,
    description: &'static str,
    hint: &'static str,
    tags: &'static [&'static str],
    github: bool,
    live: bool,
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "RetinaFace – A Face Detection Tool",
        description: "A face detection system built on the RetinaFace architecture with \
                      PyTorch, supporting multi-scale detection and facial landmark \
                      localization with an optimized inference pipeline.",
        hint: "face detection",
        tags: &["Computer Vision", "Deep Learning", "PyTorch", "Python", "Face Detection"],
        github: true,
        live: true,
    },
    Seed {
        title: "SUMAZON – Seattle University's Campus Store Website",
        description: "A full-stack e-commerce site for a campus store: React frontend, \
                      Django backend and a PL/SQL data layer for browsing, purchasing and \
                      inventory management.",
        hint: "ecommerce website",
        tags: &["React", "Django", "PL/SQL", "Full Stack", "E-commerce"],
        github: false,
        live: false,
    },
    Seed {
        title: "Diamond Data Analysis and Modeling",
        description: "Regression, clustering and classification over 6,400+ diamond \
                      records, served through a Flask app; up to 93% accuracy on diamond \
                      type classification.",
        hint: "data analysis diamond",
        tags: &[
            "Machine Learning",
            "Data Analysis",
            "Python",
            "Flask",
            "Regression",
            "Classification",
            "Clustering",
        ],
        github: true,
        live: true,
    },
    Seed {
        title: "Recipe Finder App",
        description: "A mobile-friendly app that suggests recipes from the ingredients \
                      you have, backed by a recipe API.",
        hint: "recipe app",
        tags: &["React Native", "API Integration", "Mobile App"],
        github: false,
        live: true,
    },
];

impl Project {
    /// The showcase list, in display order. Ids are 1-based positions.
    pub fn placeholders() -> Vec<Project> {
        SEEDS
            .iter()
            .enumerate()
            .map(|(i, seed)| Project {
                id: (i + 1).to_string(),
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                image_url: IMAGE_PLACEHOLDER.to_string(),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                github_url: seed.github.then(|| LINK_PLACEHOLDER.to_string()),
                live_url: seed.live.then(|| LINK_PLACEHOLDER.to_string()),
                data_ai_hint: Some(seed.hint.to_string()),
            })
            .collect()
    }
}
