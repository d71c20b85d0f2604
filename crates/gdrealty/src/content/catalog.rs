//! Content compiled into the binary.

use chrono::NaiveDate;

use super::model::{AboutEntry, BlogPost, Catalog, FloorPlan, MediaItem, Project, TeamMember};

const PEXELS: &str = "https://images.pexels.com/photos";
const TOUR_VIDEO: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

fn pexels(id: u32, width: u32) -> MediaItem {
    MediaItem::new(format!(
        "{PEXELS}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w={width}"
    ))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The built-in catalog.
#[must_use]
pub fn builtin() -> Catalog {
    Catalog {
        projects: projects(),
        posts: posts(),
        team: team(),
        about: about(),
    }
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Luxury Downtown Loft".to_string(),
            location: "Downtown District, City Center".to_string(),
            price: 850_000,
            bedrooms: 2,
            bathrooms: 2,
            sqft: 1200,
            parking: 1,
            year_built: Some(2023),
            summary: "A stunning 2-bedroom loft in the heart of the city with \
                      floor-to-ceiling windows and modern amenities."
                .to_string(),
            description: "Experience urban luxury in this stunning 2-bedroom loft featuring \
                          floor-to-ceiling windows, premium finishes, and breathtaking city \
                          views. Located in the heart of downtown with easy access to dining, \
                          shopping, and entertainment."
                .to_string(),
            features: strings(&[
                "Floor-to-ceiling windows",
                "Hardwood floors throughout",
                "Stainless steel appliances",
                "In-unit washer/dryer",
                "Private balcony",
                "Building gym and rooftop deck",
                "24/7 concierge service",
                "Pet-friendly building",
            ]),
            cover: pexels(1_457_842, 800),
            images: vec![
                pexels(1_457_842, 1200),
                pexels(1_571_460, 1200),
                pexels(1_571_471, 1200),
                pexels(1_571_453, 1200),
                pexels(1_571_463, 1200),
            ],
            floor_plans: vec![
                FloorPlan {
                    name: "Layout A".to_string(),
                    sqft: 1200,
                    ceiling_height: "10 ft".to_string(),
                    image: pexels(3_288_103, 800),
                },
                FloorPlan {
                    name: "Layout B".to_string(),
                    sqft: 1350,
                    ceiling_height: "12 ft".to_string(),
                    image: pexels(3_288_104, 800),
                },
            ],
            tour: Some(MediaItem::new(TOUR_VIDEO)),
            featured: true,
        },
        Project {
            id: 2,
            title: "Modern Family Home".to_string(),
            location: "Suburban Heights".to_string(),
            price: 650_000,
            bedrooms: 4,
            bathrooms: 3,
            sqft: 2400,
            parking: 2,
            year_built: None,
            summary: "A beautiful 4-bedroom family home with a spacious backyard and \
                      contemporary design throughout."
                .to_string(),
            description: "A beautiful 4-bedroom family home with a spacious backyard and \
                          contemporary design throughout. Perfect for growing families, this \
                          property features an open-concept living space, gourmet kitchen, and \
                          luxurious master suite. The landscaped garden provides a private \
                          oasis for relaxation and entertainment."
                .to_string(),
            features: strings(&[
                "Open-concept living space",
                "Gourmet kitchen",
                "Luxurious master suite",
                "Landscaped garden",
            ]),
            cover: pexels(1_396_132, 800),
            images: vec![
                pexels(1_396_132, 800),
                pexels(1_571_453, 800),
                pexels(1_571_463, 800),
            ],
            floor_plans: Vec::new(),
            tour: None,
            featured: true,
        },
    ]
}

#[allow(clippy::too_many_lines)]
fn posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: 1,
            title: "10 Things to Know Before Buying Your First Home".to_string(),
            excerpt: "Navigate the home-buying process with confidence. From pre-approval to \
                      closing, we'll walk you through everything you need to know."
                .to_string(),
            category: "buying-tips".to_string(),
            author: "Sarah Johnson".to_string(),
            published: date(2025, 3, 15),
            read_minutes: 5,
            image: pexels(3_288_103, 800),
            featured: true,
        },
        BlogPost {
            id: 2,
            title: "Market Update: Spring 2025 Real Estate Trends".to_string(),
            excerpt: "The latest insights on market conditions, pricing trends, and what buyers \
                      and sellers can expect this season."
                .to_string(),
            category: "market-trends".to_string(),
            author: "Michael Chen".to_string(),
            published: date(2025, 3, 12),
            read_minutes: 7,
            image: pexels(3_288_102, 800),
            featured: false,
        },
        BlogPost {
            id: 3,
            title: "Small Space, Big Style: Maximizing Your Apartment".to_string(),
            excerpt: "Transform your compact living space into a stylish and functional home \
                      with these expert design tips and tricks."
                .to_string(),
            category: "interior-design".to_string(),
            author: "Emma Rodriguez".to_string(),
            published: date(2025, 3, 10),
            read_minutes: 6,
            image: pexels(1_571_460, 800),
            featured: false,
        },
        BlogPost {
            id: 4,
            title: "Investment Properties: A Beginner's Guide".to_string(),
            excerpt: "Learn the fundamentals of real estate investing, from finding the right \
                      property to calculating returns."
                .to_string(),
            category: "investment".to_string(),
            author: "Michael Chen".to_string(),
            published: date(2025, 3, 8),
            read_minutes: 8,
            image: pexels(3_288_104, 800),
            featured: false,
        },
        BlogPost {
            id: 5,
            title: "Staging Your Home for a Quick Sale".to_string(),
            excerpt: "Professional staging tips that can help your property sell faster and for \
                      a better price."
                .to_string(),
            category: "buying-tips".to_string(),
            author: "Sarah Johnson".to_string(),
            published: date(2025, 3, 5),
            read_minutes: 4,
            image: pexels(1_571_453, 800),
            featured: false,
        },
        BlogPost {
            id: 6,
            title: "Understanding Mortgage Rates in 2025".to_string(),
            excerpt: "What current rate trends mean for buyers and how to secure the best \
                      financing for your purchase."
                .to_string(),
            category: "market-trends".to_string(),
            author: "Emma Rodriguez".to_string(),
            published: date(2025, 3, 3),
            read_minutes: 6,
            image: pexels(1_396_132, 800),
            featured: false,
        },
    ]
}

fn team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            name: "Genzebe Dibaba".to_string(),
            role: "Founder & Lead".to_string(),
            image: MediaItem::new("/images/gezu.jpg"),
            bio: "Genzebe brings 12 years of real estate expertise and an infectious \
                  enthusiasm for helping people find their perfect homes."
                .to_string(),
        },
        TeamMember {
            name: "Tujuba Kena".to_string(),
            role: "CEO".to_string(),
            image: MediaItem::new("/images/tuj.jpg"),
            bio: "Tujuba's data-driven approach and local market knowledge help clients make \
                  informed decisions with confidence."
                .to_string(),
        },
    ]
}

fn about() -> Vec<AboutEntry> {
    let entry = |question: &str, answer: &str| AboutEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    };
    vec![
        entry(
            "Who We Are",
            "We're a passionate team of real estate professionals who believe finding your \
             perfect space should be exciting, not stressful. Our diverse team brings together \
             decades of local market knowledge with fresh, innovative approaches to property \
             services.",
        ),
        entry(
            "What We Do",
            "We help people find, buy, and sell properties that truly fit their lifestyle and \
             budget. From first-time homebuyers to seasoned investors, we provide personalized \
             guidance through every step of the real estate journey.",
        ),
        entry(
            "Why Choose Us",
            "Because we genuinely care about your success. We take time to understand your \
             unique needs, provide honest market insights, and work tirelessly to achieve the \
             best outcomes. Your dreams become our mission.",
        ),
        entry(
            "Where We Serve",
            "Our expertise covers the greater metropolitan area, with deep knowledge of \
             neighborhood trends, school districts, and local amenities. We know these \
             communities inside and out because we live here too.",
        ),
        entry(
            "When We Started",
            "Founded in 2015, we've grown from a small startup to a trusted name in local real \
             estate. Our journey has been guided by one simple principle: treat every client \
             like family, and success will follow.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        assert!(builtin().validate().is_ok());
    }

    #[test]
    fn test_default_project_exists() {
        let catalog = builtin();
        let first = catalog.project(1).unwrap();
        assert_eq!(first.title, "Luxury Downtown Loft");
        assert_eq!(first.gallery().len(), 5);
        assert_eq!(first.floor_plans.len(), 2);
        assert!(first.tour.as_ref().is_some_and(MediaItem::is_video));
    }

    #[test]
    fn test_exactly_one_featured_post() {
        let catalog = builtin();
        assert_eq!(catalog.posts.iter().filter(|p| p.featured).count(), 1);
        assert_eq!(catalog.posts.len(), 6);
    }

    #[test]
    fn test_pexels_url() {
        assert_eq!(
            pexels(1_396_132, 800).as_str(),
            "https://images.pexels.com/photos/1396132/pexels-photo-1396132.jpeg?auto=compress&cs=tinysrgb&w=800"
        );
    }

    #[test]
    fn test_about_and_team() {
        let catalog = builtin();
        assert_eq!(catalog.about.len(), 5);
        assert_eq!(catalog.about[0].question, "Who We Are");
        assert_eq!(catalog.team.len(), 2);
    }
}
