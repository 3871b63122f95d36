//! Built-in seed data used as defaults for the tracked keys.
//!
//! Seed content is deliberately small. Callers that ship a real roster pass
//! their own `SeedData` to the state manager.

use crate::model::event::SocialEvent;
use crate::model::notification::Notification;
use crate::model::person::{Person, PersonStatus};
use crate::model::project::{Project, ProjectStatus};
use crate::model::settings::Settings;

/// Roster index used as the default identity when present.
pub const DEFAULT_IDENTITY_INDEX: usize = 5;

/// Default values for every seeded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub people: Vec<Person>,
    pub projects: Vec<Project>,
    pub notifications: Vec<Notification>,
    pub events: Vec<SocialEvent>,
}

impl SeedData {
    /// Seed with no entities. The default identity falls back to
    /// `fallback_identity`.
    pub fn empty() -> Self {
        Self {
            people: Vec::new(),
            projects: Vec::new(),
            notifications: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            people: seed_people(),
            projects: seed_projects(),
            notifications: seed_notifications(),
            events: seed_events(),
        }
    }
}

/// Identity used when the roster has no entry at `DEFAULT_IDENTITY_INDEX`.
pub fn fallback_identity(status: PersonStatus) -> Person {
    Person {
        id: "1".to_string(),
        name: "Usuário".to_string(),
        email: "usuario@exemplo.com".to_string(),
        role: "Usuário".to_string(),
        phone: String::new(),
        avatar_url: String::new(),
        join_date: String::new(),
        birth_date: "1990-01-01".to_string(),
        status,
        department: "TI Gerencial".to_string(),
        settings: Settings::default(),
    }
}

fn person(id: &str, name: &str, email: &str, role: &str, department: &str) -> Person {
    let mut person = Person::new(id, name, email);
    person.role = role.to_string();
    person.department = department.to_string();
    person.join_date = "2021-03-01".to_string();
    person
}

fn seed_people() -> Vec<Person> {
    vec![
        person("p-01", "Ana Souza", "ana.souza@celebre.com", "Diretora", "Diretoria"),
        person("p-02", "Bruno Lima", "bruno.lima@celebre.com", "Gerente de TI", "TI Gerencial"),
        person("p-03", "Carla Mendes", "carla.mendes@celebre.com", "Analista", "Financeiro"),
        person("p-04", "Diego Alves", "diego.alves@celebre.com", "Desenvolvedor", "TI Gerencial"),
        person("p-05", "Elisa Rocha", "elisa.rocha@celebre.com", "Designer", "Marketing"),
        person("p-06", "Felipe Costa", "felipe.costa@celebre.com", "Coordenador", "TI Gerencial"),
        person("p-07", "Gabriela Nunes", "gabriela.nunes@celebre.com", "Analista de RH", "Recursos Humanos"),
        person("p-08", "Henrique Dias", "henrique.dias@celebre.com", "Suporte", "TI Gerencial"),
    ]
}

fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Portal do Colaborador".to_string(),
            description: "Intranet para comunicação interna".to_string(),
            status: ProjectStatus::InProgress,
            progress: 60,
            owner_id: "p-02".to_string(),
            assignee_ids: vec!["p-04".to_string(), "p-05".to_string()],
            due_date: Some("2025-12-15".to_string()),
        },
        Project {
            id: 2,
            name: "Migração de Servidores".to_string(),
            description: String::new(),
            status: ProjectStatus::Planned,
            progress: 0,
            owner_id: "p-06".to_string(),
            assignee_ids: vec!["p-08".to_string()],
            due_date: None,
        },
        Project {
            id: 3,
            name: "Orçamento Anual".to_string(),
            description: String::new(),
            status: ProjectStatus::Completed,
            progress: 100,
            owner_id: "p-03".to_string(),
            assignee_ids: Vec::new(),
            due_date: Some("2025-01-31".to_string()),
        },
    ]
}

fn seed_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n-1".to_string(),
            read: false,
            title: "Novo documento".to_string(),
            message: "Política de férias atualizada".to_string(),
            timestamp: "2025-06-02T09:00:00Z".to_string(),
        },
        Notification {
            id: "n-2".to_string(),
            read: false,
            title: "Projeto atualizado".to_string(),
            message: "Portal do Colaborador chegou a 60%".to_string(),
            timestamp: "2025-06-02T11:30:00Z".to_string(),
        },
        Notification {
            id: "n-3".to_string(),
            read: true,
            title: "Boas-vindas".to_string(),
            message: "Henrique Dias entrou na equipe".to_string(),
            timestamp: "2025-05-28T08:15:00Z".to_string(),
        },
    ]
}

fn seed_events() -> Vec<SocialEvent> {
    vec![
        SocialEvent {
            id: 1,
            title: "Happy hour de junho".to_string(),
            date: "2025-06-27".to_string(),
            time: Some("18:00".to_string()),
            location: Some("Terraço".to_string()),
            description: String::new(),
            organizer_id: Some("p-07".to_string()),
        },
        SocialEvent {
            id: 2,
            title: "Treinamento de segurança".to_string(),
            date: "2025-07-10".to_string(),
            time: None,
            location: Some("Sala 3".to_string()),
            description: "Obrigatório para todas as áreas".to_string(),
            organizer_id: Some("p-02".to_string()),
        },
    ]
}
