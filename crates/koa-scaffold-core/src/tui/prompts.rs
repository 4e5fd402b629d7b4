//! Charm-style CLI prompts using cliclack

use crate::config::{
    resolve_config, validate_config, AuthKind, CreateOptions, DatabaseKind, InteractiveAnswers,
    PackageManager, PartialAuthConfig, PartialCacheConfig, PartialDatabaseConfig, PartialFeatures,
    ProjectConfig, Template,
};
use crate::error::ScaffoldError;
use crate::generator;
use crate::naming::{suggest_valid_name, validate_project_name};
use crate::runtime;
use crate::templates::{copier, version, TemplateStore};
use anyhow::Result;

/// Command shown in update advisories
const UPGRADE_COMMAND: &str = "cargo install create-koa --force";

/// Run the create workflow with interactive prompts where needed
pub async fn run(project_name: &str, options: CreateOptions, cli_version: &str) -> Result<()> {
    cliclack::intro("create-koa")?;

    // Step 1: Validate the project name before touching anything else
    check_name(project_name)?;

    let store = TemplateStore::bundled()?;

    // Step 2: Collect interactive answers for fields no other source covers
    let answers = if options.wants_prompts() {
        Some(collect_answers(&store, &options)?)
    } else {
        None
    };

    // Step 3: Resolve command-line > config-file > interactive, fill defaults
    let config = resolve_config(project_name, &options, answers.as_ref())?;

    // Step 4: Post-merge invariants
    let validation = validate_config(&config);
    if !validation.valid {
        return Err(ScaffoldError::ConfigValidation {
            errors: validation.errors,
        }
        .into());
    }

    // Step 5: Template compatibility advisory
    let manifest = store.manifest(config.template)?;
    if let Some(warning) = version::check_update(cli_version, &manifest.version, UPGRADE_COMMAND) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    cliclack::log::info(format!(
        "Template: {} - {}",
        manifest.name, manifest.description
    ))?;

    // Step 6: Package manager availability (advisory; install is skipped
    // rather than failing the whole run)
    let mut options = options;
    if !options.skip_install {
        let pm = runtime::check_package_manager(config.package_manager);
        match &pm.version {
            Some(v) => cliclack::log::success(format!("{} available ({v})", pm.name))?,
            None => {
                cliclack::log::warning(format!(
                    "{} is not installed; skipping dependency installation",
                    pm.name
                ))?;
                options.skip_install = true;
            }
        }
    }

    // Step 7: Create the project
    let generated = create_project(&store, &config, &options).await?;

    // Step 8: Show next steps
    print_next_steps(&config, &generated)?;

    Ok(())
}

/// Validate the name; uppercase is a warning, everything else aborts with
/// the full rule list and a usable suggestion
fn check_name(name: &str) -> Result<()> {
    let result = validate_project_name(name);

    for warning in &result.warnings {
        cliclack::log::warning(&warning.message)?;
    }

    if result.valid {
        return Ok(());
    }

    let suggestion = suggest_valid_name(name);
    cliclack::log::info(format!("Did you mean '{suggestion}'?"))?;

    Err(ScaffoldError::NameValidation {
        name: name.to_string(),
        issues: result.errors,
    }
    .into())
}

/// Prompt for every field no command-line flag pinned down
fn collect_answers(store: &TemplateStore, options: &CreateOptions) -> Result<InteractiveAnswers> {
    let mut answers = InteractiveAnswers::default();

    if options.template.is_none() {
        let mut select = cliclack::select("Select a template");
        for template in [Template::Basic, Template::Api, Template::Fullstack] {
            let (label, hint) = match store.manifest_by_name(template.slug()) {
                Some(m) => (m.name.clone(), m.description.clone()),
                None => (template.slug().to_string(), String::new()),
            };
            select = select.item(template, label, hint);
        }
        answers.template = Some(select.interact()?);
    }

    if options.typescript.is_none() {
        let typescript: bool = cliclack::confirm("Use TypeScript?")
            .initial_value(true)
            .interact()?;
        answers.typescript = Some(typescript);
    }

    if options.package_manager.is_none() {
        let pm: PackageManager = cliclack::select("Package manager")
            .item(PackageManager::Pnpm, "pnpm", "recommended")
            .item(PackageManager::Npm, "npm", "")
            .item(PackageManager::Yarn, "yarn", "")
            .interact()?;
        answers.package_manager = Some(pm);
    }

    if options.features.is_none() {
        answers.features = Some(select_features()?);
    }

    if cliclack::confirm("Configure a database?")
        .initial_value(false)
        .interact()?
    {
        answers.database = Some(prompt_database()?);
    }

    if cliclack::confirm("Configure a redis cache?")
        .initial_value(false)
        .interact()?
    {
        answers.cache = Some(prompt_cache()?);
    }

    if cliclack::confirm("Configure authentication?")
        .initial_value(false)
        .interact()?
    {
        answers.authentication = Some(prompt_auth()?);
    }

    Ok(answers)
}

fn select_features() -> Result<PartialFeatures> {
    let selected: Vec<&str> = cliclack::multiselect("Select features")
        .item("logging", "Request logging", "koa-logger")
        .item("cors", "CORS", "@koa/cors")
        .item("helmet", "Security headers", "koa-helmet")
        .item("rate-limit", "Rate limiting", "koa-ratelimit")
        .item("swagger", "Swagger UI", "swagger-jsdoc")
        .item("redis", "Redis client", "ioredis")
        .initial_values(vec!["logging", "cors", "helmet"])
        .required(false)
        .interact()?;

    // The prompt answers every toggle explicitly: unticked means off, not
    // unset, so a later source can still override each one individually.
    Ok(PartialFeatures {
        logging: Some(selected.contains(&"logging")),
        cors: Some(selected.contains(&"cors")),
        helmet: Some(selected.contains(&"helmet")),
        rate_limit: Some(selected.contains(&"rate-limit")),
        swagger: Some(selected.contains(&"swagger")),
        redis: Some(selected.contains(&"redis")),
    })
}

fn prompt_port(prompt: &str, default: u32) -> Result<u32> {
    let port: String = cliclack::input(prompt)
        .default_input(&default.to_string())
        .validate(|input: &String| {
            if input.parse::<u32>().is_ok() {
                Ok(())
            } else {
                Err("Enter a port number")
            }
        })
        .interact()?;
    Ok(port.parse().unwrap_or(default))
}

fn prompt_database() -> Result<PartialDatabaseConfig> {
    let kind: DatabaseKind = cliclack::select("Database type")
        .item(DatabaseKind::Postgresql, "PostgreSQL", "")
        .item(DatabaseKind::Mysql, "MySQL", "")
        .item(DatabaseKind::Mongodb, "MongoDB", "")
        .interact()?;

    let host: String = cliclack::input("Database host")
        .default_input("localhost")
        .interact()?;

    let port = prompt_port("Database port", kind.default_port())?;

    Ok(PartialDatabaseConfig {
        kind: Some(kind),
        host: Some(host),
        port: Some(port),
        database: None,
    })
}

fn prompt_cache() -> Result<PartialCacheConfig> {
    let host: String = cliclack::input("Redis host")
        .default_input("localhost")
        .interact()?;

    let port = prompt_port("Redis port", 6379)?;

    let db: String = cliclack::input("Redis database index (0-15)")
        .default_input("0")
        .validate(|input: &String| match input.parse::<u32>() {
            Ok(n) if n <= 15 => Ok(()),
            _ => Err("Enter an index between 0 and 15"),
        })
        .interact()?;

    Ok(PartialCacheConfig {
        kind: None,
        host: Some(host),
        port: Some(port),
        db: db.parse().ok(),
    })
}

fn prompt_auth() -> Result<PartialAuthConfig> {
    let kind: AuthKind = cliclack::select("Authentication type")
        .item(AuthKind::Jwt, "JWT", "stateless tokens")
        .item(AuthKind::Session, "Session", "cookie-based")
        .interact()?;

    let expires_in = match kind {
        AuthKind::Jwt => {
            let v: String = cliclack::input("Token lifetime")
                .default_input("7d")
                .interact()?;
            Some(v)
        }
        AuthKind::Session => None,
    };

    Ok(PartialAuthConfig {
        kind: Some(kind),
        expires_in,
    })
}

async fn create_project(
    store: &TemplateStore,
    config: &ProjectConfig,
    options: &CreateOptions,
) -> Result<generator::GeneratedProject> {
    // Conflict check happens before the spinner so the error isn't hidden
    let dir = generator::prepare_target(config, options.force).await?;

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let copied_files = copier::copy_template(store, config, &dir).await?;

    spinner.stop(format!(
        "Created {} files in {}",
        copied_files.len(),
        dir.display()
    ));

    if !options.no_git {
        if let Err(e) = generator::init_git(&dir).await {
            cliclack::log::warning(format!("Could not initialize git repository: {e}"))?;
        }
    }

    let mut installed = false;
    if !options.skip_install {
        runtime::install_dependencies(config, &dir).await?;
        cliclack::log::success("Dependencies installed")?;
        installed = true;
    }

    Ok(generator::GeneratedProject {
        dir,
        copied_files,
        installed,
    })
}

fn print_next_steps(config: &ProjectConfig, generated: &generator::GeneratedProject) -> Result<()> {
    let steps = generator::next_steps(config, generated);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
