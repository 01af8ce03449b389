//! First-run seed data: two bootstrap accounts and a set of sample jobs.
//!
//! Seeding is idempotent -- each step checks whether its table already has
//! rows and does nothing otherwise. Password hashes are computed by the
//! caller so this crate stays free of crypto dependencies.

use crate::models::user::CreateUser;
use crate::repositories::UserRepo;
use crate::DbPool;

use jobboard_core::roles::{ROLE_ADMIN, ROLE_USER};

/// Bootstrap admin account email.
pub const ADMIN_EMAIL: &str = "admin@mail.com";

/// Bootstrap ordinary-user account email.
pub const TEST_USER_EMAIL: &str = "test@mail.com";

/// (type, title, description, salary, location, company_name,
/// company_description, contact_email, contact_phone)
type SampleJob = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const SAMPLE_JOBS: [SampleJob; 6] = [
    (
        "Full-Time",
        "Senior Vue Developer",
        "We are seeking a talented front-end developer to join our team in Boston, MA. \
         The ideal candidate has strong skills in HTML, CSS, and JavaScript with deep \
         Vue.js experience.",
        "$70K - $80K / Year",
        "Boston, MA",
        "NewTek Solutions",
        "NewTek Solutions is a leading technology company specializing in web \
         development and digital solutions.",
        "contact@newteksolutions.com",
        "555-555-5555",
    ),
    (
        "Remote",
        "Front-End Engineer (Vue)",
        "Join our team as a front-end developer working remotely from anywhere. We are \
         looking for someone with a passion for crafting beautiful, functional web apps.",
        "$70K - $80K / Year",
        "Miami, FL",
        "Veneer Solutions",
        "Veneer Solutions is a creative agency focused on delivering exceptional \
         digital experiences.",
        "contact@veneersolutions.com",
        "555-555-5556",
    ),
    (
        "Remote",
        "Vue.js Developer",
        "Are you passionate about front-end development? Work on projects that make a \
         difference with a distributed team based out of Brooklyn, NY.",
        "$70K - $80K / Year",
        "Brooklyn, NY",
        "Dolor Cloud",
        "Dolor Cloud is an innovative startup specializing in cloud-based solutions.",
        "contact@dolorcloud.com",
        "555-555-5557",
    ),
    (
        "Part-Time",
        "Vue Front-End Developer",
        "Part-time front-end role in Phoenix, AZ for a self-motivated developer with a \
         passion for engaging user interfaces.",
        "$60K - $70K / Year",
        "Phoenix, AZ",
        "Alpha Elite",
        "Alpha Elite is a premier digital agency partnering with businesses to build \
         powerful web solutions.",
        "contact@alphaelite.com",
        "555-555-5558",
    ),
    (
        "Full-Time",
        "Full Stack Vue Developer",
        "Full-time opportunity in Atlanta, GA for a developer with expertise in Vue.js \
         and full-stack development.",
        "$90K - $100K / Year",
        "Atlanta, GA",
        "Browning Technologies",
        "Browning Technologies is a rapidly growing tech company building cutting-edge \
         web applications.",
        "contact@browningtech.com",
        "555-555-5559",
    ),
    (
        "Remote",
        "Vue Native Developer",
        "Help build mobile and web applications with a team headquartered in Portland, \
         OR. Skilled, enthusiastic developers wanted.",
        "$100K - $110K / Year",
        "Portland, OR",
        "Port Solutions Inc.",
        "Port Solutions Inc. specializes in cross-platform development.",
        "contact@portsolutions.com",
        "555-555-5560",
    ),
];

/// Seed the bootstrap accounts and sample jobs if the tables are empty.
///
/// `admin_password_hash` / `user_password_hash` are precomputed Argon2id PHC
/// strings for the two bootstrap accounts.
pub async fn seed_if_empty(
    pool: &DbPool,
    admin_password_hash: &str,
    user_password_hash: &str,
) -> Result<(), sqlx::Error> {
    seed_users(pool, admin_password_hash, user_password_hash).await?;
    seed_jobs(pool).await
}

async fn seed_users(
    pool: &DbPool,
    admin_password_hash: &str,
    user_password_hash: &str,
) -> Result<(), sqlx::Error> {
    let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if user_count > 0 {
        return Ok(());
    }

    UserRepo::create(
        pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash: admin_password_hash.to_string(),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: TEST_USER_EMAIL.to_string(),
            password_hash: user_password_hash.to_string(),
            role: ROLE_USER.to_string(),
        },
    )
    .await?;

    tracing::info!("Seeded bootstrap admin and test user accounts");
    Ok(())
}

async fn seed_jobs(pool: &DbPool) -> Result<(), sqlx::Error> {
    let job_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if job_count > 0 {
        return Ok(());
    }

    for (job_type, title, description, salary, location, company, company_desc, email, phone) in
        SAMPLE_JOBS
    {
        sqlx::query(
            "INSERT INTO jobs (type, title, description, salary, location, \
                               company_name, company_description, contact_email, contact_phone)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(job_type)
        .bind(title)
        .bind(description)
        .bind(salary)
        .bind(location)
        .bind(company)
        .bind(company_desc)
        .bind(email)
        .bind(phone)
        .execute(pool)
        .await?;
    }

    tracing::info!(count = SAMPLE_JOBS.len(), "Seeded sample jobs");
    Ok(())
}
