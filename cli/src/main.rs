use clap::{Parser, Subcommand};
use courseware::Config;
use courseware::error::AppResult;
use courseware::model::entity::{
    Course, CourseCreate, Lesson, LessonCreate, Module, ModuleCreate, UserEntity,
    UserEntityCreate,
};
use courseware::model::{CrudRepository, DbConnection, ModelManager};
use courseware::web::AuthenticatedUser;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for seeding the courseware DB", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage modules
    Module {
        #[command(subcommand)]
        action: ModuleCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// Grants access to the admin dashboard
        #[arg(long, default_value_t = false)]
        admin: bool,
        /// Grants access to the student dashboard
        #[arg(long, default_value_t = false)]
        student: bool,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

/// Module management
#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    Add {
        /// Course to attach the module to
        #[arg(long)]
        course_id: uuid::Uuid,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0)]
        order_index: i32,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
}

async fn database_uri() -> String {
    match std::env::var("DATABASE_URL") {
        Ok(uri) => uri,
        Err(_) => Config::get_or_init(cfg!(debug_assertions))
            .await
            .app()
            .database_uri()
            .to_string(),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect_now(&database_uri().await).await?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::system();

    match args.command {
        Commands::User { action } => match action {
            UserCommands::Add {
                username,
                password,
                email,
                first_name,
                last_name,
                admin,
                student,
            } => {
                let user = UserEntity::create(
                    &mm,
                    &actor,
                    UserEntityCreate {
                        username,
                        email,
                        first_name,
                        last_name,
                        password_hash: courseware::auth::hash_password(&password)?,
                        is_admin: admin,
                        is_student: student,
                    },
                )
                .await?;
                println!("User created: {} ({})", user.username(), user.id());
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add { title, description } => {
                let course =
                    Course::create(&mm, &actor, CourseCreate { title, description }).await?;
                println!("Course created: {:?}", course);
            }
        },

        Commands::Module { action } => match action {
            ModuleCommands::Add {
                course_id,
                title,
                description,
                order_index,
            } => {
                let module = Module::create(
                    &mm,
                    &actor,
                    ModuleCreate {
                        course_id,
                        title,
                        description,
                        order_index: Some(order_index),
                    },
                )
                .await?;
                println!("Module created: {:?}", module);
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add { title, content } => {
                let lesson = Lesson::create(
                    &mm,
                    &actor,
                    LessonCreate {
                        title,
                        content,
                        attachment: None,
                    },
                )
                .await?;
                println!("Lesson created: {:?}", lesson);
            }
        },
    }

    Ok(())
}
