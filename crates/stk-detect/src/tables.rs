//! Signature tables: ordered keyword-to-label mappings.
//!
//! Table order matters twice: labels are appended in first-seen order,
//! and the README license scan takes the first table hit, not the first
//! occurrence in the text.

/// An immutable ordered mapping from lowercase keywords to display
/// labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    pairs: Vec<(String, String)>,
}

impl SignatureTable {
    /// Build a table from `(keyword, label)` pairs. Keywords are
    /// lowercased on the way in; matching is always case-insensitive.
    #[must_use]
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(keyword, label)| (keyword.to_lowercase(), (*label).to_string()))
                .collect(),
        }
    }

    /// Iterate `(keyword, label)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(keyword, label)| (keyword.as_str(), label.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The full set of tables one audit run matches against.
#[derive(Debug, Clone)]
pub struct DetectionTables {
    /// Web/UI frameworks, by dependency substring.
    pub frameworks: SignatureTable,
    /// Databases and ORMs, by dependency substring.
    pub databases: SignatureTable,
    /// Authentication libraries, by dependency substring.
    pub authentication: SignatureTable,
    /// Test frameworks, by dependency substring.
    pub testing: SignatureTable,
    /// Deployment platforms, by exact top-level filename.
    pub deployment_files: SignatureTable,
    /// Test-runner config files, by filename prefix inside a test folder.
    pub test_config_prefixes: SignatureTable,
}

impl DetectionTables {
    /// The built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            frameworks: SignatureTable::new(&[
                ("django", "Django"),
                ("flask", "Flask"),
                ("react", "React"),
                ("angular", "Angular"),
                ("vue", "Vue.js"),
                ("express", "Express"),
                ("rails", "Ruby on Rails"),
                ("laravel", "Laravel"),
                ("spring-boot", "Spring Boot"),
                ("fastapi", "FastAPI"),
                ("next", "Next.js"),
                ("nuxt", "Nuxt"),
                ("svelte", "Svelte"),
            ]),
            databases: SignatureTable::new(&[
                ("mysql", "MySQL"),
                ("psycopg2", "PostgreSQL"),
                ("pg", "PostgreSQL"),
                ("sqlalchemy", "SQL-based (generic)"),
                ("mongoose", "MongoDB"),
                ("mongodb", "MongoDB"),
                ("redis", "Redis"),
                ("sqlite", "SQLite"),
                ("supabase", "Supabase"),
                ("prisma", "Prisma (ORM)"),
            ]),
            authentication: SignatureTable::new(&[
                ("clerk", "Clerk"),
                ("jwt", "JWT"),
                ("next-auth", "NextAuth"),
                ("passport", "Passport.js"),
                ("oauth", "OAuth"),
                ("flask-login", "Flask-Login"),
                ("devise", "Devise"),
                ("omniauth", "OmniAuth"),
            ]),
            testing: SignatureTable::new(&[
                ("pytest", "pytest"),
                ("unittest", "unittest"),
                ("jest", "Jest"),
                ("mocha", "Mocha"),
                ("junit", "JUnit"),
                ("rspec", "RSpec"),
            ]),
            deployment_files: SignatureTable::new(&[
                ("dockerfile", "Docker"),
                ("docker-compose.yml", "Docker Compose"),
                ("docker-compose.yaml", "Docker Compose"),
                ("procfile", "Heroku"),
                ("vercel.json", "Vercel"),
                ("netlify.toml", "Netlify"),
                ("fly.toml", "Fly.io"),
                ("app.yaml", "Google App Engine"),
            ]),
            test_config_prefixes: SignatureTable::new(&[
                ("jest.config", "Jest"),
                ("vitest.config", "Vitest"),
                ("cypress.config", "Cypress"),
                ("karma.conf", "Karma"),
                (".mocharc", "Mocha"),
                ("pytest.ini", "pytest"),
                ("phpunit", "PHPUnit"),
            ]),
        }
    }
}

/// License names probed in the README fallback scan, in priority order.
pub const LICENSE_NAMES: [&str; 4] = ["MIT", "GPL", "Apache", "BSD"];
