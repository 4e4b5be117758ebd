//! Compiled-in default catalog and blog, used when nothing is stored yet.

use chrono::NaiveDate;

use citropoth_core::{BlogPostId, Category, Price, ProductId, ReviewId, ReviewRating};

use crate::models::{BlogPost, Product, Review};

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => NaiveDate::MIN,
    }
}

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    dollars: u32,
    description: &'static str,
    category: Category,
    image: &'static str,
    rating: f64,
    is_limited: bool,
}

const PRODUCTS: [SeedProduct; 8] = [
    SeedProduct {
        id: "1",
        name: "Earthbound Terra Cotta Vase",
        dollars: 45,
        description: "Hand-thrown terra cotta vase with a rustic glaze. Perfect for dried botanicals.",
        category: Category::Ceramics,
        image: "https://images.unsplash.com/photo-1578749556568-bc2c40e68b61?auto=format&fit=crop&q=80&w=600",
        rating: 4.8,
        is_limited: false,
    },
    SeedProduct {
        id: "2",
        name: "Indigo Macramé Wall Hanging",
        dollars: 68,
        description: "Intricately woven cotton wall art dyed with natural indigo.",
        category: Category::Textiles,
        image: "https://images.unsplash.com/photo-1528642252433-28956891632f?auto=format&fit=crop&q=80&w=600",
        rating: 4.9,
        is_limited: false,
    },
    SeedProduct {
        id: "3",
        name: "Twilight Forest Oil Painting",
        dollars: 120,
        description: "Original 12x12 oil painting on stretched canvas capturing a misty forest at dusk.",
        category: Category::Paintings,
        image: "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?auto=format&fit=crop&q=80&w=600",
        rating: 5.0,
        is_limited: false,
    },
    SeedProduct {
        id: "l1",
        name: "Celestial Hand-Glazed Urn",
        dollars: 240,
        description: "A limited edition piece from Master Elena Vance. Featuring 24k gold leaf details and a unique midnight-blue gradient glaze. Only 10 pieces were ever created.",
        category: Category::Ceramics,
        image: "https://images.unsplash.com/photo-1610701596007-11502861dcfa?auto=format&fit=crop&q=80&w=600",
        rating: 5.0,
        is_limited: true,
    },
    SeedProduct {
        id: "4",
        name: "DIY Beeswax Candle Kit",
        dollars: 32,
        description: "Everything you need to make 5 pure beeswax candles at home.",
        category: Category::DiyKits,
        image: "https://images.unsplash.com/photo-1602871171844-9a7294829715?auto=format&fit=crop&q=80&w=600",
        rating: 4.7,
        is_limited: false,
    },
    SeedProduct {
        id: "l2",
        name: "Ancestral Silk Tapestry",
        dollars: 450,
        description: "Woven over three months using rare heirloom silk. A true masterpiece of modern textile art by Master Liam Rivers.",
        category: Category::Textiles,
        image: "https://images.unsplash.com/photo-1544413647-b51049300985?auto=format&fit=crop&q=80&w=600",
        rating: 5.0,
        is_limited: true,
    },
    SeedProduct {
        id: "5",
        name: "Hammered Silver Hoops",
        dollars: 55,
        description: "Sterling silver hoop earrings with a hand-hammered texture.",
        category: Category::Jewelry,
        image: "https://images.unsplash.com/photo-1535632066927-ab7c9ab60908?auto=format&fit=crop&q=80&w=600",
        rating: 4.6,
        is_limited: false,
    },
    SeedProduct {
        id: "6",
        name: "Linen Embroidered Napkins",
        dollars: 28,
        description: "Set of 4 soft linen napkins with botanical embroidery.",
        category: Category::Textiles,
        image: "https://images.unsplash.com/photo-1605370908691-0f75746c0397?auto=format&fit=crop&q=80&w=600",
        rating: 4.9,
        is_limited: false,
    },
];

fn vase_reviews() -> Vec<Review> {
    vec![
        Review {
            id: ReviewId::new("r1"),
            user: "Sarah J.".to_owned(),
            rating: ReviewRating::saturating(5),
            comment: "Absolutely beautiful craftsmanship!".to_owned(),
            date: date(2023, 10, 12),
        },
        Review {
            id: ReviewId::new("r2"),
            user: "Mark T.".to_owned(),
            rating: ReviewRating::saturating(4),
            comment: "Smaller than expected but lovely.".to_owned(),
            date: date(2023, 11, 5),
        },
    ]
}

/// The launch catalog.
#[must_use]
pub fn default_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            price: Price::from_dollars(seed.dollars),
            category: seed.category,
            image: seed.image.to_owned(),
            description: seed.description.to_owned(),
            rating: seed.rating,
            reviews: if seed.id == "1" {
                vase_reviews()
            } else {
                Vec::new()
            },
            is_limited: seed.is_limited,
        })
        .collect()
}

/// The launch journal.
#[must_use]
pub fn default_blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: BlogPostId::new("b1"),
            title: "The Art of Slow Crafting".to_owned(),
            excerpt: "In a world of mass production, why handmade goods still matter.".to_owned(),
            content: "In our studio, we believe that time is the most valuable ingredient. When an artisan spends hours, days, or even weeks on a single object, they imbue it with a spirit that no machine can replicate. This is the art of slow crafting\u{2014}a rejection of the disposable culture and a return to meaningful, long-lasting beauty.".to_owned(),
            author: "Elena Vance".to_owned(),
            date: date(2024, 3, 15),
            image: "https://images.unsplash.com/photo-1459749411177-0421800673e6?auto=format&fit=crop&q=80&w=800".to_owned(),
            category: "Philosophy".to_owned(),
        },
        BlogPost {
            id: BlogPostId::new("b2"),
            title: "Sustainable Dyeing Techniques".to_owned(),
            excerpt: "Exploring natural colors derived from your own kitchen scraps.".to_owned(),
            content: "Nature provides a palette far richer and safer than any synthetic chemical. From the warm ochre of onion skins to the vibrant fuschia of beetroots, your kitchen is a treasure trove of artisanal dyes. In this guide, we walk you through the gentle process of extracting these colors while respecting our environment.".to_owned(),
            author: "Liam Rivers".to_owned(),
            date: date(2024, 3, 22),
            image: "https://images.unsplash.com/photo-1544413647-b51049300985?auto=format&fit=crop&q=80&w=800".to_owned(),
            category: "Tutorial".to_owned(),
        },
    ]
}
