//! Topic-specific follow-up copy appended to successful answers

use regex::Regex;
use std::sync::LazyLock;


/// A keyword category and the paragraph it contributes
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub copy: &'static str,
}

/// Checked in order; only the first match is used
pub static CATEGORIES: &[Category] = &[
    Category {
        name: "sonic",
        keywords: &[
            "sonic",
            "open networking",
            "open network",
            "white box",
            "white-box",
            "whitebox",
            "disaggregated",
            "nos",
        ],
        copy: "Our engineers have delivered SONiC-based solutions on leading white-box platforms, from feature development to production support. See our [SONiC services](/services/sonic).",
    },
    Category {
        name: "ai_fabric",
        keywords: &[
            "ai",
            "ml",
            "ai/ml",
            "machine learning",
            "gpu",
            "gpus",
            "rdma",
            "roce",
            "rocev2",
            "ai fabric",
        ],
        copy: "We build lossless, congestion-aware Ethernet fabrics sized for GPU training and inference clusters. Learn more about [AI fabric networking](/solutions/ai-fabric).",
    },
    Category {
        name: "cloud",
        keywords: &[
            "cloud",
            "hybrid",
            "multi-cloud",
            "multicloud",
            "aws",
            "azure",
            "gcp",
            "kubernetes",
        ],
        copy: "Our hybrid cloud practice connects on-prem data centers and public clouds with consistent policy and visibility. Explore [cloud networking](/solutions/cloud).",
    },
    Category {
        name: "evpn_vxlan",
        keywords: &["evpn", "vxlan", "overlay", "overlays", "underlay", "bgp"],
        copy: "We design and validate EVPN/VXLAN overlays for multi-tenant data centers at scale. Read about our [data center fabrics](/solutions/data-center).",
    },
    Category {
        name: "security",
        keywords: &[
            "security",
            "secure",
            "compliance",
            "compliant",
            "firewall",
            "zero trust",
            "zero-trust",
            "acl",
        ],
        copy: "Security and compliance are built into every network we deliver, from segmentation to audit-ready configuration baselines. See [network security](/solutions/security).",
    },
    Category {
        name: "automation",
        keywords: &[
            "automation",
            "automate",
            "iac",
            "infrastructure as code",
            "ansible",
            "terraform",
            "ci/cd",
            "netdevops",
        ],
        copy: "Our automation team turns network changes into tested, version-controlled pipelines. Discover [network automation](/services/automation).",
    },
];

/// Marks the appended paragraph
const AUGMENT_MARKER: &str = "💡";

static MATCHERS: LazyLock<Vec<(&'static Category, Regex)>> = LazyLock::new(|| {
    CATEGORIES
        .iter()
        .filter_map(|category| {
            let alternatives = category
                .keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            match Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")) {
                Ok(re) => Some((category, re)),
                Err(e) => {
                    tracing::error!(category = category.name, error = %e, "Invalid keyword pattern");
                    None
                }
            }
        })
        .collect()
});

/// First category whose keywords occur in `query`, case-insensitively
pub fn match_category(query: &str) -> Option<&'static Category> {
    MATCHERS
        .iter()
        .find(|(_, re)| re.is_match(query))
        .map(|(category, _)| *category)
}

/// Append at most one category paragraph to `answer`
pub fn augment(answer: &str, query: &str) -> String {
    match match_category(query) {
        Some(category) => format!("{answer}\n\n{AUGMENT_MARKER} {}", category.copy),
        None => answer.to_string(),
    }
}
