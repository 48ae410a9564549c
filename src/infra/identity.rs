use crate::domain::PlayerId;

/// Поставщик имени локального игрока.
///
/// В мини-аппе имя приходит от хост-платформы (профиль пользователя
/// чат-приложения); движку достаточно этого узкого интерфейса.
pub trait IdentityProvider {
    fn local_display_name(&self) -> String;
}

/// Фиксированное имя (тесты, конфиг).
#[derive(Clone, Debug)]
pub struct FixedIdentity(pub String);

impl IdentityProvider for FixedIdentity {
    fn local_display_name(&self) -> String {
        self.0.clone()
    }
}

/// Имя из окружения: $USER, иначе «Игрок».
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvIdentity;

impl IdentityProvider for EnvIdentity {
    fn local_display_name(&self) -> String {
        std::env::var("USER").unwrap_or_else(|_| "Игрок".to_string())
    }
}

/// Утилита: получить отображаемое имя игрока по его ID.
/// Реализации могут ходить в профиль игры, кэш, куда угодно.
pub trait PlayerNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String;
}

/// Простая реализация: отображаемое имя = "Player {id}".
pub struct DefaultNameResolver;

impl PlayerNameResolver for DefaultNameResolver {
    fn resolve_name(&self, player_id: PlayerId) -> String {
        format!("Player {}", player_id)
    }
}
