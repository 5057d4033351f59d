use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand_core::OsRng;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use estate_primitives::models::entities::enum_types::{PropertyType, PurchaseType, UserRole};
use estate_primitives::models::entities::property::NewProperty;
use estate_primitives::models::entities::user::{NewUser, User};
use eyre::{eyre, Report};
use std::env;
use uuid::Uuid;

struct Listing {
    property_type: PropertyType,
    purchase: PurchaseType,
    price: f64,
    bedrooms: Option<i32>,
    area: Option<f64>,
    location: &'static str,
    city: &'static str,
    state: &'static str,
    features: Option<&'static str>,
}

const LISTINGS: [Listing; 4] = [
    Listing {
        property_type: PropertyType::Apartment,
        purchase: PurchaseType::Rent,
        price: 25_000.0,
        bedrooms: Some(2),
        area: Some(85.0),
        location: "Bole Atlas",
        city: "Addis Ababa",
        state: "Addis Ababa",
        features: Some("parking, elevator, backup generator"),
    },
    Listing {
        property_type: PropertyType::House,
        purchase: PurchaseType::Sale,
        price: 12_500_000.0,
        bedrooms: Some(4),
        area: Some(320.0),
        location: "CMC Michael",
        city: "Addis Ababa",
        state: "Addis Ababa",
        features: Some("garden, parking, servant quarter"),
    },
    Listing {
        property_type: PropertyType::Condominium,
        purchase: PurchaseType::Sale,
        price: 3_800_000.0,
        bedrooms: Some(1),
        area: Some(60.0),
        location: "Piassa",
        city: "Hawassa",
        state: "Sidama",
        features: None,
    },
    Listing {
        property_type: PropertyType::RealEstate,
        purchase: PurchaseType::Sale,
        price: 45_000_000.0,
        bedrooms: None,
        area: Some(1_200.0),
        location: "Lakeside",
        city: "Bahir Dar",
        state: "Amhara",
        features: Some("lake view"),
    },
];

fn hash_password(password: &str) -> Result<String, Report> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| eyre!("Failed to hash password: {}", e))
}

fn establish_connection() -> Result<PgConnection, Report> {
    let database_url = env::var("DATABASE_URL").map_err(|_| eyre!("DATABASE_URL must be set"))?;
    PgConnection::establish(&database_url)
        .map_err(|e| eyre!("Error connecting to the database: {}", e))
}

fn main() -> Result<(), Report> {
    dotenv().ok();
    println!("Seeding database...");

    let mut conn = establish_connection()?;

    clean_db(&mut conn)?;

    seed_user(&mut conn, "agent@estate.test", "Demo Agent", "password123", UserRole::User)?;
    seed_user(&mut conn, "admin@estate.test", "Demo Admin", "admin12345", UserRole::Admin)?;

    let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    for listing in &LISTINGS {
        seed_listing(&mut conn, base_url.trim_end_matches('/'), listing)?;
    }

    println!("Database seeded successfully");
    Ok(())
}

fn clean_db(conn: &mut PgConnection) -> Result<(), Report> {
    println!("Cleaning database...");
    diesel::sql_query("TRUNCATE payments, properties, users RESTART IDENTITY CASCADE")
        .execute(conn)?;
    Ok(())
}

fn seed_user(
    conn: &mut PgConnection,
    u_email: &str,
    u_name: &str,
    u_password: &str,
    u_role: UserRole,
) -> Result<Uuid, Report> {
    use estate_primitives::schema::users;

    let existing = users::table
        .filter(users::email.eq(u_email))
        .first::<User>(conn)
        .optional()?;

    if let Some(user) = existing {
        println!("User {} already exists", u_email);
        return Ok(user.id);
    }

    let new_user = NewUser {
        email: u_email.to_string(),
        name: Some(u_name.to_string()),
        password_hash: hash_password(u_password)?,
        role: u_role,
    };

    let inserted: User = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(conn)?;

    println!("Created user: {}", u_email);
    Ok(inserted.id)
}

fn seed_listing(conn: &mut PgConnection, base_url: &str, listing: &Listing) -> Result<(), Report> {
    use estate_primitives::schema::properties;

    let images = vec![format!("{}/uploads/sample-{}.jpg", base_url, Uuid::new_v4())];
    let description = format!(
        "{} in {} offered for {}, ready to move in",
        listing.property_type, listing.location, listing.purchase
    );

    diesel::insert_into(properties::table)
        .values(&NewProperty {
            property_type: listing.property_type,
            purchase: listing.purchase,
            price: listing.price,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bedrooms.map(|b| b.max(1)),
            area: listing.area,
            description: &description,
            location: listing.location,
            city: listing.city,
            state: listing.state,
            zip_code: "1000",
            contact_detail: "+251911000000",
            features: listing.features,
            images: &images,
            video: None,
            status: "AVAILABLE",
        })
        .execute(conn)?;

    println!("Created listing in {}", listing.city);
    Ok(())
}
