//! Static route table.
//!
//! The language-agnostic baseline layer: one entry per public page with its
//! path, head metadata, and sitemap hints. Admin overrides and global
//! defaults are layered on top by the resolver; the table itself never
//! changes at runtime.

/// Metadata for one static route.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    /// Stable route key, also the default SEO override key.
    pub key: &'static str,
    /// Path without a language prefix ("" for the home page).
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub category: &'static str,
    /// Sitemap hints.
    pub priority: f64,
    pub changefreq: &'static str,
}

const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        key: "home",
        path: "",
        title: "Home",
        description: "Growth-focused digital agency - transform your business with cutting-edge web, design and AI solutions",
        keywords: &["digital agency", "AI solutions", "web development"],
        category: "main",
        priority: 1.0,
        changefreq: "daily",
    },
    RouteEntry {
        key: "about",
        path: "about",
        title: "About Us",
        description: "Learn about our mission, vision, and the team behind your success",
        keywords: &["about", "digital agency team", "company mission"],
        category: "company",
        priority: 1.0,
        changefreq: "daily",
    },
    RouteEntry {
        key: "services",
        path: "services",
        title: "Our Services",
        description: "Comprehensive digital services including web development, design, SEO, and AI solutions",
        keywords: &["digital services", "web development", "SEO", "design"],
        category: "main",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "portfolio",
        path: "portfolio",
        title: "Portfolio",
        description: "Explore our successful projects and case studies across various industries",
        keywords: &["portfolio", "case studies", "projects", "client work"],
        category: "main",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "team",
        path: "team",
        title: "Our Team",
        description: "Meet the creative minds and experts behind our success",
        keywords: &["team", "experts", "developers", "designers"],
        category: "company",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "process",
        path: "process",
        title: "Our Process",
        description: "Discover our proven methodology for delivering exceptional digital solutions",
        keywords: &["process", "methodology", "workflow"],
        category: "company",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "case-studies",
        path: "case-studies",
        title: "Case Studies",
        description: "Real client success stories and project outcomes",
        keywords: &["case studies", "success stories", "client results"],
        category: "main",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "careers",
        path: "careers",
        title: "Careers",
        description: "Join our team of innovative professionals",
        keywords: &["careers", "jobs", "hiring"],
        category: "company",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "blog",
        path: "blog",
        title: "Blog",
        description: "Insights, guides and news from the agency",
        keywords: &["blog", "insights", "guides"],
        category: "company",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "contact",
        path: "contact",
        title: "Contact",
        description: "Get in touch to discuss your next project",
        keywords: &["contact", "quote", "project inquiry"],
        category: "main",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "free-growth-call",
        path: "free-growth-call",
        title: "Free Growth Call",
        description: "Book a free strategy call with our growth experts",
        keywords: &["growth call", "free consultation"],
        category: "main",
        priority: 0.8,
        changefreq: "weekly",
    },
    // Legal
    RouteEntry {
        key: "privacy-policy",
        path: "legal/privacy-policy",
        title: "Privacy Policy",
        description: "",
        keywords: &[],
        category: "legal",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "terms-of-service",
        path: "legal/terms-of-service",
        title: "Terms of Service",
        description: "",
        keywords: &[],
        category: "legal",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "cookie-policy",
        path: "legal/cookie-policy",
        title: "Cookie Policy",
        description: "",
        keywords: &[],
        category: "legal",
        priority: 0.8,
        changefreq: "weekly",
    },
    // Service sub-pages
    RouteEntry {
        key: "web-development",
        path: "services/web-development",
        title: "Web Development",
        description: "Modern, fast and scalable web applications",
        keywords: &["web development", "react", "full-stack"],
        category: "services",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "ui-ux-design",
        path: "services/ui-ux-design",
        title: "UI/UX Design",
        description: "Interfaces your customers love to use",
        keywords: &["ui design", "ux design", "product design"],
        category: "services",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "brand-growth",
        path: "services/brand-growth",
        title: "Brand Growth",
        description: "Positioning and campaigns that grow your brand",
        keywords: &["branding", "growth marketing"],
        category: "services",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "social-media-content",
        path: "services/social-media-content",
        title: "Social Media Content",
        description: "Content that builds an audience",
        keywords: &["social media", "content creation"],
        category: "services",
        priority: 1.0,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "virtual-assistance",
        path: "services/virtual-assistance",
        title: "Virtual Assistance",
        description: "Reliable remote support for your operations",
        keywords: &["virtual assistant", "remote support"],
        category: "services",
        priority: 0.8,
        changefreq: "weekly",
    },
    RouteEntry {
        key: "customer-support",
        path: "services/customer-support",
        title: "Customer Support",
        description: "Support teams that keep customers happy",
        keywords: &["customer support", "helpdesk"],
        category: "services",
        priority: 0.8,
        changefreq: "weekly",
    },
];

/// The full static route table (used by the sitemap generator).
pub fn static_routes() -> &'static [RouteEntry] {
    ROUTES
}

/// Look up the baseline metadata for a route key.
///
/// Unknown keys fall back to the home entry: the caller always needs a
/// non-null title for the document head.
pub fn route_metadata(key: &str) -> &'static RouteEntry {
    ROUTES
        .iter()
        .find(|route| route.key == key)
        .unwrap_or(&ROUTES[0])
}

/// Match an unprefixed path (no language segment, no leading slash) to a
/// static route key.
pub fn route_for_path(path: &str) -> Option<&'static str> {
    let trimmed = path.trim_matches('/');
    ROUTES
        .iter()
        .find(|route| route.path == trimmed)
        .map(|route| route.key)
}
