//! Keyword lexicons and the deterministic fallback classifier/replier.
//!
//! This is the path taken whenever the oracle is denied by the rate limiter,
//! errors out, or answers with something unparseable. It is a fixed,
//! order-independent substring scoring rule: no stemming, no stop-word
//! removal, no normalization beyond lowercasing.

use crate::classifier::Category;

/// Phrases indicating an actionable (productive) email.
pub const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "suporte",
    "atualização",
    "dúvida",
    "problema",
    "erro",
    "reclamação",
    "ajuda",
    "solicitação",
    "urgente",
    "contrato",
    "fatura",
    "pagamento",
    "cobrança",
    "suporte técnico",
    "defeito",
    "bug",
    "sistema",
    "login",
    "senha",
    "acesso",
    "proposta",
    "orçamento",
    "projeto",
    "prazo",
];

/// Phrases indicating a social/no-action (unproductive) email.
pub const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "feliz natal",
    "obrigado",
    "parabéns",
    "bom dia",
    "boa tarde",
    "agradecimento",
    "saudações",
    "cumprimentos",
    "feliz ano novo",
    "boas festas",
    "saudação",
    "contato futuro",
    "mantenha contato",
];

/// Classify by lexicon substring counts over the lowercased text.
///
/// The strictly greater count wins; ties (including zero-zero) resolve to
/// `Unproductive`.
pub fn fallback_category(text: &str) -> Category {
    let lower = text.to_lowercase();
    let productive = PRODUCTIVE_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    let unproductive = UNPRODUCTIVE_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();

    if productive > unproductive {
        Category::Productive
    } else {
        Category::Unproductive
    }
}

// ── Canned replies ──────────────────────────────────────────────────

/// A content keyword group mapped to a canned productive reply.
struct ReplyGroup {
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Tiered canned replies for productive emails, first match wins.
const REPLY_GROUPS: &[ReplyGroup] = &[
    // Financial report requests
    ReplyGroup {
        keywords: &["relatório financeiro", "relatório", "balanço", "demonstrativo"],
        reply: "Recebemos sua solicitação de relatório financeiro. Nossa equipe \
                irá providenciá-lo e enviá-lo em breve.",
    },
    // Technical problems
    ReplyGroup {
        keywords: &["erro", "bug", "defeito", "falha", "não funciona"],
        reply: "Identificamos o problema técnico relatado. Nossa equipe de suporte \
                já está investigando e retornaremos com uma solução.",
    },
    // Commercial inquiries
    ReplyGroup {
        keywords: &["proposta", "orçamento", "comercial", "contrato"],
        reply: "Agradecemos seu interesse. Nosso time comercial enviará a proposta \
                e as condições em breve.",
    },
    // Billing
    ReplyGroup {
        keywords: &["fatura", "cobrança", "pagamento", "boleto"],
        reply: "Recebemos sua mensagem sobre faturamento. Nossa equipe financeira \
                irá verificar e retornar em breve.",
    },
    // Support requests
    ReplyGroup {
        keywords: &["suporte", "ajuda", "dúvida", "acesso", "senha", "login"],
        reply: "Agradecemos seu contato com o suporte. Sua solicitação foi \
                registrada e retornaremos o mais rápido possível.",
    },
];

/// Generic canned reply for productive emails with no group match.
pub const GENERIC_PRODUCTIVE_REPLY: &str =
    "Agradecemos seu contato. Nossa equipe está analisando sua solicitação e retornaremos em breve.";

/// Generic canned reply for unproductive emails.
pub const GENERIC_UNPRODUCTIVE_REPLY: &str =
    "Obrigado pela sua mensagem. Ficamos felizes em saber de você!";

/// Produce a canned reply when the oracle is unavailable.
///
/// Productive emails first try the content keyword groups against the
/// lowercased text; unproductive emails (and unmatched productive ones) get
/// the generic sentence for their category.
pub fn fallback_reply(category: Category, text: &str) -> String {
    match category {
        Category::Productive => {
            let lower = text.to_lowercase();
            for group in REPLY_GROUPS {
                if group.keywords.iter().any(|kw| lower.contains(kw)) {
                    return group.reply.to_string();
                }
            }
            GENERIC_PRODUCTIVE_REPLY.to_string()
        }
        Category::Unproductive => GENERIC_UNPRODUCTIVE_REPLY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_email_is_productive() {
        // Contains "suporte", "urgente", "erro", "sistema", "login".
        let text = "Preciso de suporte urgente com erro no sistema de login";
        assert_eq!(fallback_category(text), Category::Productive);
    }

    #[test]
    fn holiday_greeting_is_unproductive() {
        let text = "Muito obrigado, feliz natal e boas festas!";
        assert_eq!(fallback_category(text), Category::Unproductive);
    }

    #[test]
    fn no_keywords_ties_to_unproductive() {
        assert_eq!(fallback_category("xyz"), Category::Unproductive);
        assert_eq!(fallback_category(""), Category::Unproductive);
    }

    #[test]
    fn equal_nonzero_counts_tie_to_unproductive() {
        // One productive keyword ("suporte") and one unproductive ("obrigado").
        let text = "obrigado pelo suporte";
        assert_eq!(fallback_category(text), Category::Unproductive);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Tenho uma dúvida sobre a fatura deste mês";
        let first = fallback_category(text);
        for _ in 0..10 {
            assert_eq!(fallback_category(text), first);
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            fallback_category("URGENTE: ERRO no SISTEMA"),
            Category::Productive
        );
    }

    #[test]
    fn reply_matches_technical_problem_group() {
        let reply = fallback_reply(Category::Productive, "O sistema apresenta um bug ao salvar");
        assert!(reply.contains("problema técnico"));
    }

    #[test]
    fn reply_matches_billing_group() {
        let reply = fallback_reply(Category::Productive, "Não recebi o boleto deste mês");
        assert!(reply.contains("faturamento"));
    }

    #[test]
    fn reply_groups_match_case_insensitively() {
        let reply = fallback_reply(Category::Productive, "Segue pedido de ORÇAMENTO");
        assert!(reply.contains("proposta"));
    }

    #[test]
    fn unmatched_productive_gets_generic_reply() {
        let reply = fallback_reply(Category::Productive, "Qual o andamento?");
        assert_eq!(reply, GENERIC_PRODUCTIVE_REPLY);
    }

    #[test]
    fn unproductive_always_gets_generic_reply() {
        // Even when the text would match a productive group.
        let reply = fallback_reply(Category::Unproductive, "obrigado pelo suporte com o erro");
        assert_eq!(reply, GENERIC_UNPRODUCTIVE_REPLY);
    }
}
