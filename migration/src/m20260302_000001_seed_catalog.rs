use sea_orm_migration::prelude::*;

/// Seeds the demo catalog: categories, games with their packages, and
/// platform vouchers.
#[derive(DeriveMigrationName)]
pub struct Migration;

/// Convert a UUID string (with dashes) to an `SQLite` hex-blob literal.
///
/// `SeaORM` stores UUID columns as 16-byte BLOBs in `SQLite`, so raw SQL
/// inserts must use `X'...'` notation to match the format.
fn uuid_blob(uuid_str: &str) -> String {
    let hex: String = uuid_str.chars().filter(|c| *c != '-').collect();
    format!("X'{hex}'")
}

fn seed_uuid(prefix: u8, n: u32) -> String {
    format!("{prefix}0000000-0000-4000-8000-{n:012}")
}

struct Category {
    name: &'static str,
    slug: &'static str,
    icon: &'static str,
    description: &'static str,
}

struct Game {
    name: &'static str,
    slug: &'static str,
    publisher: &'static str,
    description: &'static str,
    servers: &'static str,
    is_popular: bool,
    packages: &'static [Package],
}

struct Package {
    amount: i32,
    unit: &'static str,
    price: u32,
}

struct Voucher {
    name: &'static str,
    slug: &'static str,
    platform: &'static str,
    price: u32,
}

const SEEDED_STOCK: i32 = 250;

#[rustfmt::skip]
const CATEGORIES: &[Category] = &[
    Category { name: "Top Up Game", slug: "top-up-game", icon: "🎮", description: "Top up your favorite games" },
    Category { name: "Voucher",     slug: "voucher",     icon: "🎫", description: "Digital vouchers for various platforms" },
    Category { name: "Promo",       slug: "promo",       icon: "🔥", description: "Special promotional offers" },
];

#[rustfmt::skip]
const GAMES: &[Game] = &[
    Game {
        name: "Mobile Legends", slug: "mobile-legends", publisher: "Moonton",
        description: "Top up Mobile Legends diamonds instantly",
        servers: r#"["Global","Southeast Asia","Western","Eastern"]"#,
        is_popular: true,
        packages: &[
            Package { amount: 86,  unit: "Diamonds", price: 15_000 },
            Package { amount: 172, unit: "Diamonds", price: 25_000 },
            Package { amount: 257, unit: "Diamonds", price: 35_000 },
            Package { amount: 344, unit: "Diamonds", price: 45_000 },
            Package { amount: 429, unit: "Diamonds", price: 55_000 },
            Package { amount: 878, unit: "Diamonds", price: 100_000 },
        ],
    },
    Game {
        name: "Free Fire", slug: "free-fire", publisher: "Garena",
        description: "Top up Free Fire diamonds quickly and safely",
        servers: r#"["Global","Brazil","India","Indonesia"]"#,
        is_popular: true,
        packages: &[
            Package { amount: 70,   unit: "Diamonds", price: 10_000 },
            Package { amount: 140,  unit: "Diamonds", price: 20_000 },
            Package { amount: 355,  unit: "Diamonds", price: 50_000 },
            Package { amount: 720,  unit: "Diamonds", price: 100_000 },
            Package { amount: 1450, unit: "Diamonds", price: 200_000 },
        ],
    },
    Game {
        name: "Genshin Impact", slug: "genshin-impact", publisher: "HoYoverse",
        description: "Top up Genesis Crystals for Genshin Impact",
        servers: r#"["Asia","America","Europe","TW/HK/MO"]"#,
        is_popular: true,
        packages: &[
            Package { amount: 60,   unit: "Genesis Crystals", price: 15_000 },
            Package { amount: 300,  unit: "Genesis Crystals", price: 75_000 },
            Package { amount: 980,  unit: "Genesis Crystals", price: 245_000 },
            Package { amount: 1980, unit: "Genesis Crystals", price: 499_000 },
        ],
    },
    Game {
        name: "PUBG Mobile", slug: "pubg-mobile", publisher: "Tencent Games",
        description: "Top up PUBG Mobile UC instantly",
        servers: r#"["Global","Korea","Vietnam","Chinese"]"#,
        is_popular: true,
        packages: &[
            Package { amount: 60,   unit: "UC", price: 10_000 },
            Package { amount: 325,  unit: "UC", price: 50_000 },
            Package { amount: 660,  unit: "UC", price: 100_000 },
            Package { amount: 1800, unit: "UC", price: 250_000 },
            Package { amount: 3850, unit: "UC", price: 500_000 },
        ],
    },
    Game {
        name: "Call of Duty Mobile", slug: "call-of-duty-mobile", publisher: "Activision",
        description: "Top up COD Mobile CP points",
        servers: r#"["Global","Garena"]"#,
        is_popular: false,
        packages: &[
            Package { amount: 100,  unit: "Credits", price: 15_000 },
            Package { amount: 500,  unit: "Credits", price: 75_000 },
            Package { amount: 1000, unit: "Credits", price: 150_000 },
        ],
    },
];

#[rustfmt::skip]
const VOUCHERS: &[Voucher] = &[
    Voucher { name: "Steam Wallet IDR 10,000",  slug: "steam-wallet-idr-10000",  platform: "Steam",       price: 12_000 },
    Voucher { name: "Steam Wallet IDR 20,000",  slug: "steam-wallet-idr-20000",  platform: "Steam",       price: 22_000 },
    Voucher { name: "Steam Wallet IDR 50,000",  slug: "steam-wallet-idr-50000",  platform: "Steam",       price: 52_000 },
    Voucher { name: "Steam Wallet IDR 100,000", slug: "steam-wallet-idr-100000", platform: "Steam",       price: 102_000 },
    Voucher { name: "Google Play IDR 10,000",   slug: "google-play-idr-10000",   platform: "Google Play", price: 11_000 },
    Voucher { name: "Google Play IDR 25,000",   slug: "google-play-idr-25000",   platform: "Google Play", price: 26_000 },
    Voucher { name: "Google Play IDR 50,000",   slug: "google-play-idr-50000",   platform: "Google Play", price: 51_000 },
    Voucher { name: "PSN Wallet IDR 50,000",    slug: "psn-wallet-idr-50000",    platform: "PlayStation", price: 55_000 },
    Voucher { name: "PSN Wallet IDR 100,000",   slug: "psn-wallet-idr-100000",   platform: "PlayStation", price: 105_000 },
    Voucher { name: "iTunes IDR 25,000",        slug: "itunes-idr-25000",        platform: "iTunes",      price: 27_000 },
    Voucher { name: "iTunes IDR 50,000",        slug: "itunes-idr-50000",        platform: "iTunes",      price: 52_000 },
    Voucher { name: "iTunes IDR 100,000",       slug: "itunes-idr-100000",       platform: "iTunes",      price: 102_000 },
];

/// Backend-specific literal fragments for raw inserts.
struct Dialect {
    postgres: bool,
}

impl Dialect {
    fn id(&self, uuid: &str) -> String {
        if self.postgres {
            format!("'{uuid}'")
        } else {
            uuid_blob(uuid)
        }
    }

    const fn flag(&self, value: bool) -> &'static str {
        match (self.postgres, value) {
            (true, true) => "true",
            (true, false) => "false",
            (false, true) => "1",
            (false, false) => "0",
        }
    }

    const fn now(&self) -> &'static str {
        if self.postgres {
            "NOW()"
        } else {
            "'2026-01-01T00:00:00+00:00'"
        }
    }

    const fn insert(&self) -> &'static str {
        if self.postgres {
            "INSERT INTO"
        } else {
            "INSERT OR IGNORE INTO"
        }
    }

    const fn on_conflict(&self) -> &'static str {
        if self.postgres {
            " ON CONFLICT (id) DO NOTHING"
        } else {
            ""
        }
    }
}

fn category_sql(d: &Dialect, idx: u32, c: &Category) -> String {
    format!(
        "{insert} game_category (id, name, slug, icon, description, is_active, created_at, updated_at) \
         VALUES ({id}, '{name}', '{slug}', '{icon}', '{description}', {active}, {now}, {now}){conflict}",
        insert = d.insert(),
        id = d.id(&seed_uuid(1, idx)),
        name = c.name,
        slug = c.slug,
        icon = c.icon,
        description = c.description,
        active = d.flag(true),
        now = d.now(),
        conflict = d.on_conflict(),
    )
}

fn game_sql(d: &Dialect, idx: u32, category_id: &str, g: &Game) -> String {
    format!(
        "{insert} game (id, category_id, name, slug, description, publisher, is_popular, \
         is_active, server_options, created_at, updated_at) \
         VALUES ({id}, {category}, '{name}', '{slug}', '{description}', '{publisher}', \
         {popular}, {active}, '{servers}', {now}, {now}){conflict}",
        insert = d.insert(),
        id = d.id(&seed_uuid(2, idx)),
        category = d.id(category_id),
        name = g.name,
        slug = g.slug,
        description = g.description,
        publisher = g.publisher,
        popular = d.flag(g.is_popular),
        active = d.flag(true),
        servers = g.servers,
        now = d.now(),
        conflict = d.on_conflict(),
    )
}

fn package_sql(d: &Dialect, idx: u32, game_id: &str, sort_order: u32, p: &Package) -> String {
    format!(
        "{insert} game_package (id, game_id, name, amount, unit, price, is_active, sort_order, \
         created_at, updated_at) \
         VALUES ({id}, {game}, '{amount} {unit}', {amount}, '{unit}', {price}.00, {active}, \
         {sort_order}, {now}, {now}){conflict}",
        insert = d.insert(),
        id = d.id(&seed_uuid(3, idx)),
        game = d.id(game_id),
        amount = p.amount,
        unit = p.unit,
        price = p.price,
        active = d.flag(true),
        now = d.now(),
        conflict = d.on_conflict(),
    )
}

/// Delete only the rows this migration inserted into `table`.
fn delete_seeded_sql(
    d: &Dialect,
    table: &str,
    prefix: u8,
    indexes: impl Iterator<Item = u32>,
) -> String {
    let ids: Vec<String> = indexes.map(|idx| d.id(&seed_uuid(prefix, idx))).collect();
    format!("DELETE FROM {table} WHERE id IN ({})", ids.join(", "))
}

fn voucher_sql(d: &Dialect, idx: u32, v: &Voucher) -> String {
    format!(
        "{insert} voucher (id, name, slug, description, price, platform, is_active, stock, \
         created_at, updated_at) \
         VALUES ({id}, '{name}', '{slug}', 'Digital voucher for {platform}', {price}.00, \
         '{platform}', {active}, {SEEDED_STOCK}, {now}, {now}){conflict}",
        insert = d.insert(),
        id = d.id(&seed_uuid(4, idx)),
        name = v.name,
        slug = v.slug,
        platform = v.platform,
        price = v.price,
        active = d.flag(true),
        now = d.now(),
        conflict = d.on_conflict(),
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let dialect = Dialect {
            postgres: backend == sea_orm::DatabaseBackend::Postgres,
        };

        let mut statements = Vec::new();

        for (idx, category) in (1..).zip(CATEGORIES) {
            statements.push(category_sql(&dialect, idx, category));
        }

        // All seeded games live in the "Top Up Game" category.
        let top_up_category = seed_uuid(1, 1);
        let mut package_idx = 0;
        for (game_idx, game) in (1..).zip(GAMES) {
            statements.push(game_sql(&dialect, game_idx, &top_up_category, game));

            let game_id = seed_uuid(2, game_idx);
            for (sort_order, package) in (1..).zip(game.packages) {
                package_idx += 1;
                statements.push(package_sql(
                    &dialect,
                    package_idx,
                    &game_id,
                    sort_order,
                    package,
                ));
            }
        }

        for (idx, voucher) in (1..).zip(VOUCHERS) {
            statements.push(voucher_sql(&dialect, idx, voucher));
        }

        for sql in statements {
            db.execute(sea_orm::Statement::from_string(backend, sql))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        let dialect = Dialect {
            postgres: backend == sea_orm::DatabaseBackend::Postgres,
        };

        let packages = GAMES.iter().flat_map(|g| g.packages);
        let statements = [
            delete_seeded_sql(&dialect, "game_package", 3, (1..).zip(packages).map(|(i, _)| i)),
            delete_seeded_sql(&dialect, "game", 2, (1..).zip(GAMES).map(|(i, _)| i)),
            delete_seeded_sql(&dialect, "game_category", 1, (1..).zip(CATEGORIES).map(|(i, _)| i)),
            delete_seeded_sql(&dialect, "voucher", 4, (1..).zip(VOUCHERS).map(|(i, _)| i)),
        ];

        for sql in statements {
            db.execute(sea_orm::Statement::from_string(backend, sql))
                .await?;
        }

        Ok(())
    }
}
