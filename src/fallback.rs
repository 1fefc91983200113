use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use crate::models::{Project, ProjectFilter, ProjectStatus};

/// Snapshot timestamp shared by every fallback record (2025-01-01T00:00:00Z).
const SNAPSHOT_EPOCH_SECS: i64 = 1_735_689_600;

const IMAGE_HOST: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com";

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    image: &'static str,
    url: &'static str,
    category: &'static str,
    order_index: i32,
    featured: bool,
    tags: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        title: "ARIA MARKET",
        description: "Trade musical artists like stocks! View artist portfolios, track AMTRAC prices, and invest in the future of music.",
        image: "aria-market-homepage-mk26a2GFNZEJepAJ8iLHtzWEBSnVZj.png",
        url: "https://app.ariatrader.com/",
        category: "aria",
        order_index: 1,
        featured: true,
        tags: &["music", "investment", "cryptocurrency"],
    },
    Seed {
        id: "2",
        title: "ARIA DASHBOARDS",
        description: "Empowering Artists Through Market-Driven Music. ARIA Dashboards give musicians and labels access to a groundbreaking new model of exposure, valuation, and revenue.",
        image: "aria-dashboards-NI55O4wJ8EZXWgjn20VztqAEHWhllv.png",
        url: "https://dashboards.ariatrader.com/",
        category: "aria",
        order_index: 2,
        featured: true,
        tags: &["analytics", "music", "dashboard"],
    },
    Seed {
        id: "3",
        title: "ARIA LANDING PAGE",
        description: "Love The Music... Trade The Artist! ARIA is the first decentralized marketplace where you can invest in musical artists using AMTRAC cryptocurrency.",
        image: "aria-landing-page-T5SyHAf0KHH6kLckclEmaLiuT0BTgh.png",
        url: "https://ariatrader.com/",
        category: "aria",
        order_index: 3,
        featured: true,
        tags: &["landing", "music", "investment"],
    },
    Seed {
        id: "4",
        title: "AMTRAC TOKEN",
        description: "The Sound of the Future. Traded Today. AMTRAC is the native token of the ARIA platform, a groundbreaking marketplace where fans can invest in music artists like stocks.",
        image: "amtrac-token-homepage-Ewvl7v1U5Edd0FxEcYh1OMr0W3TLY3.png",
        url: "https://v0-aria-music-website.vercel.app/",
        category: "amtrac",
        order_index: 4,
        featured: false,
        tags: &["token", "cryptocurrency", "music"],
    },
    Seed {
        id: "5",
        title: "MARLEY QR GENERATOR",
        description: "Generate custom QR codes for your Eventbrite posters with MARLEY's vibrant styling and professional print options.",
        image: "marley-qr-homepage-e73PR18TA0VCYd7iBzbdQ8wspmR5qs.png",
        url: "https://v0-marley-qr-app.vercel.app/",
        category: "marley",
        order_index: 5,
        featured: false,
        tags: &["qr-code", "branding", "marketing"],
    },
    Seed {
        id: "6",
        title: "MARLEY TRAILER GENERATOR",
        description: "Create cinematic trailers for artists and marketers with drag & drop media assets, text overlays, and audio integration.",
        image: "marley-trailer-generator-homepage-Fh7EZwAg1vtNRSUlRIojsf5JYVf9BC.png",
        url: "https://v0-marley-trailer-design.vercel.app/",
        category: "marley",
        order_index: 6,
        featured: false,
        tags: &["video", "trailer", "marketing"],
    },
    Seed {
        id: "7",
        title: "MARLEY IMAGE OPTIMISER",
        description: "Compress and convert your images to optimize your website performance. Reduce file sizes by up to 80% while preserving visual quality.",
        image: "marley-image-optimiser-homepage-flmC0MaRiZnPQQ36QKVM2AvskHdZRw.png",
        url: "https://v0-marley-image-optimiser.vercel.app/",
        category: "marley",
        order_index: 7,
        featured: false,
        tags: &["image", "optimization", "web"],
    },
    Seed {
        id: "8",
        title: "MARLEY JINGLE MACHINE",
        description: "Create your perfect 39-second jingle by recording your voice, adding music, and applying effects.",
        image: "marley-jingle-machine-homepage-gTEIllKNWmdjFAzNUJLQFBMQus4S9t.png",
        url: "https://deluxe-kelpie-3745d0.netlify.app/",
        category: "marley",
        order_index: 8,
        featured: false,
        tags: &["music", "jingle", "audio"],
    },
];

static CATALOGUE: LazyLock<Vec<Project>> = LazyLock::new(|| {
    let stamp: DateTime<Utc> = DateTime::from_timestamp(SNAPSHOT_EPOCH_SECS, 0).unwrap_or_default();
    SEEDS
        .iter()
        .map(|seed| Project {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            image_url: format!("{IMAGE_HOST}/{}", seed.image),
            project_url: seed.url.to_string(),
            is_external: true,
            category: seed.category.to_string(),
            order_index: seed.order_index,
            status: ProjectStatus::Active,
            featured: seed.featured,
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            view_count: 0,
            created_at: stamp,
            updated_at: stamp,
        })
        .collect()
});

/// The full compiled-in catalogue, in snapshot order.
pub fn projects() -> &'static [Project] {
    &CATALOGUE
}

/// The catalogue after applying `filter`, with the same semantics as a live query.
pub fn select(filter: &ProjectFilter) -> Vec<Project> {
    filter.apply(CATALOGUE.iter().cloned())
}
