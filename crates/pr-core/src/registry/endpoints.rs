//! Registry HTTP paths and per-endpoint fallback messages.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that would end or restructure a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Matriculas that cannot be addressed under `/audit/`: a literal sibling
/// route and the dot segments a URL parser collapses.
pub const RESERVED_AUDIT_SEGMENTS: [&str; 3] = ["transfers", ".", ".."];

pub const SIWE_START: &str = "/auth/siwe/start";
pub const SIWE_VERIFY: &str = "/auth/siwe/verify";
pub const PROPERTIES: &str = "/properties";
pub const PROPOSALS: &str = "/proposals";
pub const POS_VALIDATE: &str = "/pos/validate";
pub const AUDIT_TRANSFERS: &str = "/audit/transfers";
pub const HEALTH: &str = "/health";
pub const ADMIN_ASSIGN_ROLE: &str = "/admin/assign-role";

pub fn proposal_decision(proposal_id: u64) -> String {
    format!("/proposals/{proposal_id}/decision")
}

pub fn transfer_initiate(proposal_id: u64) -> String {
    format!("/transfers/{proposal_id}/initiate")
}

pub fn transfer_sign(proposal_id: u64) -> String {
    format!("/transfers/{proposal_id}/sign")
}

/// `matricula` is percent-encoded as one segment; callers reject
/// [`RESERVED_AUDIT_SEGMENTS`] first.
pub fn audit_trail(matricula: &str) -> String {
    format!("/audit/{}", utf8_percent_encode(matricula, PATH_SEGMENT))
}

pub fn is_reserved_audit_segment(matricula: &str) -> bool {
    RESERVED_AUDIT_SEGMENTS.contains(&matricula)
}

pub mod fallback {
    pub const VERIFY_SIGNATURE: &str = "Falha ao verificar assinatura";
    pub const REGISTER_PROPERTY: &str = "Erro ao registrar propriedade";
    pub const SUBMIT_PROPOSAL: &str = "Erro ao enviar proposta";
    pub const DECIDE_PROPOSAL: &str = "Erro ao registrar decisão";
    pub const INITIATE_TRANSFER: &str = "Erro ao iniciar transferência";
    pub const SIGN_TRANSFER: &str = "Erro ao registrar assinatura";
    pub const POS_VALIDATE: &str = "Erro ao validar (PoS)";
    pub const AUDIT_TRAIL: &str = "Erro ao consultar histórico";
    pub const LIST_TRANSFERS: &str = "Erro ao listar transferências";
    pub const HEALTH: &str = "Serviço indisponível";
    pub const ASSIGN_ROLE: &str = "Erro ao atribuir papel";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_trail_encodes_the_matricula_as_one_segment() {
        assert_eq!(audit_trail("M-100"), "/audit/M-100");
        assert_eq!(audit_trail("12/2024?x=1"), "/audit/12%2F2024%3Fx=1");
        assert_eq!(audit_trail("lote 7#b"), "/audit/lote%207%23b");
        assert_eq!(audit_trail("matrícula"), "/audit/matr%C3%ADcula");
    }

    #[test]
    fn sibling_route_and_dot_segments_are_reserved() {
        assert!(is_reserved_audit_segment("transfers"));
        assert!(is_reserved_audit_segment(".."));
        assert!(!is_reserved_audit_segment("transfers-1"));
    }
}
